//! Spell, prayer and perk delegate.
//!
//! The channeled-cast state machine lives here: Uncast → options
//! gathering (cancellable, nothing spent) → immediate resolution or
//! Channeling, then Focus actions burn the channel down until the
//! spell resolves exactly once. Prayers and perks are one-shot
//! activations that cost Energy rather than AP.

use crawl_core::{
    ActionKind, ActionOutcome, ActionRequest, ActionTarget, ChanneledSpell, CharacterId,
    DungeonState, GameConfig, SpellTarget,
};

use super::{ActionDispatcher, character, character_mut, invalid_target};
use crate::error::EngineError;
use crate::services::CastAttempt;

impl ActionDispatcher {
    pub(super) async fn cast_spell(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Spell(spell) = &request.secondary else {
            return Ok(invalid_target(ActionKind::CastSpell));
        };
        let spell = spell.clone();

        let spell_target = match request.target {
            ActionTarget::Character(id) => SpellTarget::Character(id),
            ActionTarget::Position(pos) => SpellTarget::Position(pos),
            ActionTarget::None => SpellTarget::None,
            _ => return Ok(invalid_target(ActionKind::CastSpell)),
        };

        let name = {
            let ch = character(dungeon, actor)?;
            if !ch.casts_spells() {
                return Ok(ActionOutcome::failure(format!(
                    "{} cannot cast spells.",
                    ch.name
                )));
            }
            if ch.hero().is_some_and(|h| h.channeled.is_some()) {
                return Ok(ActionOutcome::failure(format!(
                    "{} is already channeling a spell.",
                    ch.name
                )));
            }
            ch.name.clone()
        };

        let ap = if spell.quick {
            GameConfig::QUICK_SPELL_COST
        } else {
            GameConfig::FULL_SPELL_COST
        };
        if !character(dungeon, actor)?.budget.can_afford(ap) {
            return Ok(ActionOutcome::failure(format!(
                "{name} needs {ap} AP to cast {}.",
                spell.name
            )));
        }

        // Suspension point: nothing has been spent if the player backs
        // out here.
        let caster = self.services().caster()?;
        let Some(options) = caster.request_casting_options(dungeon, actor, &spell).await else {
            return Ok(ActionOutcome::failure(format!(
                "{name} decided not to cast {}.",
                spell.name
            )));
        };

        match caster.cast_spell(dungeon, actor, &spell, &options).await {
            CastAttempt::InsufficientMana => {
                return Ok(ActionOutcome::failure(format!(
                    "{name} does not have the mana to cast {}.",
                    spell.name
                )));
            }
            CastAttempt::Funded => {}
        }

        if options.focus_points == 0 {
            let message = caster
                .resolve_spell(dungeon, actor, &spell, &spell_target, &options)
                .await;
            if let Some(hero) = character_mut(dungeon, actor)?.hero_mut() {
                hero.ready_to_cast = false;
            }
            return Ok(ActionOutcome::success(message, ap));
        }

        // One or more focus points: the spell enters the Channeling
        // state attached to the caster.
        let channel = ChanneledSpell::new(spell.clone(), spell_target, options);
        let focus = channel.focus_remaining;
        if let Some(hero) = character_mut(dungeon, actor)?.hero_mut() {
            hero.ready_to_cast = false;
            hero.channeled = Some(channel);
        }
        Ok(ActionOutcome::success(
            format!(
                "{name} begins channeling {}; {focus} focus action(s) remain.",
                spell.name
            ),
            ap,
        ))
    }

    pub(super) async fn focus(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
    ) -> Result<ActionOutcome, EngineError> {
        let (name, steps, spell_done) = {
            let ch = character_mut(dungeon, actor)?;
            let name = ch.name.clone();
            let ap_available = ch.budget.action_points();
            let Some(hero) = ch.hero_mut() else {
                return Ok(ActionOutcome::failure(format!(
                    "{name} cannot channel spells."
                )));
            };
            let Some(channel) = hero.channeled.as_mut() else {
                return Ok(ActionOutcome::failure(format!(
                    "{name} is not channeling a spell."
                )));
            };

            // Each focus step costs 1 AP; accumulate as many as the
            // remaining budget allows in one action.
            let steps = channel.focus_remaining.min(ap_available);
            channel.focus_remaining -= steps;
            let done = channel.focus_remaining == 0;
            (name, steps, done)
        };

        if !spell_done {
            let remaining = character(dungeon, actor)?
                .hero()
                .and_then(|h| h.channeled.as_ref())
                .map(|c| c.focus_remaining)
                .unwrap_or(0);
            return Ok(ActionOutcome::success(
                format!("{name} concentrates; {remaining} focus action(s) remain."),
                steps,
            ));
        }

        // The channel is exhausted: resolve exactly once and clear it.
        let channel = character_mut(dungeon, actor)?
            .hero_mut()
            .and_then(|h| h.channeled.take());
        let Some(channel) = channel else {
            return Ok(ActionOutcome::failure(format!(
                "{name} is not channeling a spell."
            )));
        };
        let message = self
            .services()
            .caster()?
            .resolve_spell(
                dungeon,
                actor,
                &channel.spell,
                &channel.target,
                &channel.options,
            )
            .await;
        Ok(ActionOutcome::success(message, steps))
    }

    pub(super) async fn pray(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let prayer = match (&request.secondary, &request.target) {
            (ActionTarget::Prayer(p), _) | (_, ActionTarget::Prayer(p)) => p.clone(),
            _ => return Ok(invalid_target(ActionKind::Pray)),
        };

        {
            let ch = character(dungeon, actor)?;
            if !ch.prays() {
                return Ok(ActionOutcome::failure(format!(
                    "{} cannot call on prayers.",
                    ch.name
                )));
            }
        }

        // Energy is consumed by the collaborator even when the prayer
        // goes unanswered.
        let outcome = self
            .services()
            .powers()?
            .activate_prayer(dungeon, actor, &prayer)
            .await;
        Ok(ActionOutcome {
            message: outcome.message,
            success: outcome.success,
            ap_spent: 0,
        })
    }

    pub(super) async fn use_perk(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let perk = match (&request.secondary, &request.target) {
            (ActionTarget::Perk(p), _) | (_, ActionTarget::Perk(p)) => *p,
            _ => return Ok(invalid_target(ActionKind::UsePerk)),
        };

        {
            let ch = character(dungeon, actor)?;
            if !ch.has_perk(perk) {
                return Ok(ActionOutcome::failure(format!(
                    "{} does not know the {perk} perk.",
                    ch.name
                )));
            }
        }

        let outcome = self
            .services()
            .powers()?
            .activate_perk(dungeon, actor, perk)
            .await;
        Ok(ActionOutcome {
            message: outcome.message,
            success: outcome.success,
            ap_spent: 0,
        })
    }
}
