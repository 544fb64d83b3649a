//! Combat delegate: thin orchestration over the external resolver.
//!
//! The resolver owns hit and damage math. This layer validates targets,
//! special-cases the ranged pre-reload and the Hunter's Eye bonus shot,
//! applies positional side effects (shove pushes, charge room changes)
//! and decides the AP consequences of each outcome.

use crawl_core::{
    ActionKind, ActionOutcome, ActionRequest, ActionTarget, ActiveStatusEffect, CharacterId,
    DungeonState, Perk, StatusKind, discounted_cost, nominal_cost,
};

use super::{ActionDispatcher, character, character_mut, invalid_target};
use crate::error::EngineError;

impl ActionDispatcher {
    pub(super) async fn standard_attack(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Character(target) = request.target else {
            return Ok(invalid_target(ActionKind::StandardAttack));
        };

        let (name, weapon, frenzied) = {
            let ch = character(dungeon, actor)?;
            (
                ch.name.clone(),
                ch.weapon.clone(),
                ch.statuses.has(StatusKind::Frenzy),
            )
        };
        let Some(weapon) = weapon else {
            return Ok(ActionOutcome::failure(format!(
                "{name} has no weapon equipped."
            )));
        };

        // Ranged weapons fire only when loaded; the reload is folded
        // into this attack at the weapon's reload cost.
        let mut ap = nominal_cost(ActionKind::StandardAttack);
        if weapon.needs_reload() {
            let total = ap + weapon.reload_cost;
            let ch = character_mut(dungeon, actor)?;
            if !ch.budget.can_afford(total) {
                return Ok(ActionOutcome::failure(format!(
                    "{name} cannot reload and fire the {}: needs {total} AP.",
                    weapon.name
                )));
            }
            if let Some(w) = ch.weapon.as_mut() {
                w.loaded = true;
            }
            ap = total;
        }

        // Hunter's Eye may squeeze off a bonus shot before the main
        // resolution. The perk grants it permanently; the status marks
        // it primed by an outside effect.
        let primed = {
            let ch = character(dungeon, actor)?;
            ch.has_perk(Perk::HuntersEye) || ch.statuses.has(StatusKind::HuntersEye)
        };
        let mut bonus_note = String::new();
        if weapon.ranged && primed {
            let powers = self.services().powers()?;
            if powers
                .request_perk_activation(dungeon, actor, Perk::HuntersEye)
                .await
            {
                let activation = powers.activate_perk(dungeon, actor, Perk::HuntersEye).await;
                if activation.success {
                    let bonus = self
                        .services()
                        .combat()?
                        .standard_attack(dungeon, actor, target)
                        .await;
                    bonus_note = format!("Bonus shot: {} ", bonus.message);
                } else {
                    bonus_note = format!("{} ", activation.message);
                }
            }
        }

        let outcome = self
            .services()
            .combat()?
            .standard_attack(dungeon, actor, target)
            .await;

        let mut message = format!("{bonus_note}{}", outcome.message);
        if frenzied && outcome.hit {
            // A Frenzied hit costs nothing; the character acts again.
            ap = 0;
            message.push_str(&format!(" The frenzy drives {name} on!"));
        }

        Ok(ActionOutcome {
            message,
            success: outcome.hit,
            ap_spent: ap,
        })
    }

    pub(super) async fn power_attack(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Character(target) = request.target else {
            return Ok(invalid_target(ActionKind::PowerAttack));
        };

        let ap = {
            let ch = character_mut(dungeon, actor)?;
            // Over-committing leaves the attacker open regardless of
            // whether the blow lands.
            ch.vulnerable = true;
            discounted_cost(ActionKind::PowerAttack, &ch.statuses)
        };

        let outcome = self
            .services()
            .combat()?
            .power_attack(dungeon, actor, target)
            .await;

        Ok(ActionOutcome {
            message: outcome.message,
            success: outcome.hit,
            ap_spent: ap,
        })
    }

    pub(super) async fn charge_attack(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Character(target) = request.target else {
            return Ok(invalid_target(ActionKind::ChargeAttack));
        };

        let outcome = self
            .services()
            .combat()?
            .charge_attack(dungeon, actor, target)
            .await;

        // The forced move component may have carried the attacker into
        // another room.
        if let Some(room) = outcome.attacker_room {
            dungeon.move_to_room(actor, room);
        }

        Ok(ActionOutcome {
            message: outcome.message,
            success: outcome.hit,
            ap_spent: nominal_cost(ActionKind::ChargeAttack),
        })
    }

    pub(super) async fn shove(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
        shield_bash: bool,
    ) -> Result<ActionOutcome, EngineError> {
        let kind = if shield_bash {
            ActionKind::ShieldBash
        } else {
            ActionKind::Shove
        };
        let ActionTarget::Character(target) = request.target else {
            return Ok(invalid_target(kind));
        };

        let outcome = self
            .services()
            .combat()?
            .shove(dungeon, actor, target)
            .await;

        if outcome.hit
            && let Some(room) = outcome.target_room
        {
            dungeon.move_to_room(target, room);
        }

        Ok(ActionOutcome {
            message: outcome.message,
            success: outcome.hit,
            ap_spent: nominal_cost(kind),
        })
    }

    pub(super) async fn stunning_strike(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Character(target) = request.target else {
            return Ok(invalid_target(ActionKind::StunningStrike));
        };

        let outcome = self
            .services()
            .combat()?
            .stunning_strike(dungeon, actor, target)
            .await;

        let mut message = outcome.message;
        if outcome.hit {
            let applied = self
                .services()
                .status()?
                .attempt_to_apply_status(
                    dungeon,
                    actor,
                    target,
                    ActiveStatusEffect::timed(StatusKind::Stunned, 1),
                )
                .await;
            if !applied {
                message.push_str(" The stun is shrugged off.");
            }
        }

        Ok(ActionOutcome {
            message,
            success: outcome.hit,
            ap_spent: nominal_cost(ActionKind::StunningStrike),
        })
    }
}
