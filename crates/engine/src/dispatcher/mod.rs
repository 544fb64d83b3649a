//! The action dispatcher: `perform_action` entry point.
//!
//! One entry point orchestrates every action: pre-flight guards
//! (affordability, Frenzy restriction, pending-move finalization),
//! dispatch to the per-kind handler, then the central AP debit and
//! post-action invariants. Handlers never debit AP themselves; they
//! report the actual charge in [`ActionOutcome::ap_spent`] and the
//! debit here is the single enforcement point for the AP ≥ 0 rule.
//!
//! Guard order matters and follows the rulebook:
//! 1. The discounted nominal cost must be affordable (fail fast, no
//!    state touched). Drain-all actions (EndTurn, Parry, SetOverwatch)
//!    cost whatever is left and always pass this guard.
//! 2. A Frenzied character may only attack, move or end its turn.
//! 3. An unfinished move is finalized first: Sprint is stripped, 1 AP
//!    charged, the movement pool re-armed at half distance. If that
//!    leaves too little AP for the requested action, the action aborts
//!    with the finalization charge as its only cost.

mod casting;
mod combat;
mod interact;
mod movement;
mod special;

use crawl_core::{
    ActionKind, ActionOutcome, ActionRequest, Character, CharacterId, DungeonState, GameConfig,
    StatusKind, discounted_cost, nominal_cost,
};

use crate::error::EngineError;
use crate::services::Services;

/// Stateful dispatcher owning the collaborator bundle.
///
/// One call at a time per character: `perform_action` holds the mutable
/// dungeon state for its full duration, including all suspension points,
/// so no other mutation can interleave with an activation.
pub struct ActionDispatcher {
    services: Services,
}

impl ActionDispatcher {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub(crate) fn services(&self) -> &Services {
        &self.services
    }

    /// Nominal AP cost lookup, exposed for callers building action menus.
    pub fn action_cost(kind: ActionKind) -> u32 {
        nominal_cost(kind)
    }

    /// Resolves one requested action for `actor`.
    ///
    /// Rule failures (ineligibility, failed tests, cancellation) come
    /// back as unsuccessful [`ActionOutcome`]s with no or partial AP
    /// spent; `Err` is reserved for genuine faults.
    pub async fn perform_action(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let kind = request.kind;
        tracing::debug!(actor = actor.0, action = %kind, "dispatching action");

        let (cost, name) = {
            let ch = character(dungeon, actor)?;
            // Drain-all actions take whatever is left, so they are
            // affordable even at 0 AP.
            let cost = if kind.drains_all_ap() {
                0
            } else {
                discounted_cost(kind, &ch.statuses)
            };
            (cost, ch.name.clone())
        };

        // Guard 1: affordability of the (discounted) nominal cost.
        {
            let ch = character(dungeon, actor)?;
            if !ch.budget.can_afford(cost) {
                return Ok(ActionOutcome::failure(format!(
                    "{name} cannot afford {kind}: needs {cost} AP, has {} left.",
                    ch.budget.action_points()
                )));
            }

            // Guard 2: Frenzy locks out everything but attack/move/end.
            if ch.statuses.has(StatusKind::Frenzy) && !kind.allowed_while_frenzied() {
                return Ok(ActionOutcome::failure(format!(
                    "{name} is lost to frenzy and can only attack, move or end the turn."
                )));
            }
        }

        // Guard 3: finalize an unfinished move before any other action.
        let mut finalize_charge = 0;
        if kind != ActionKind::Move {
            let ch = character_mut(dungeon, actor)?;
            if ch.budget.has_unfinished_move() {
                // Sprint only ever applies to the very first move.
                ch.statuses.remove(StatusKind::Sprint);

                if ch.budget.debit(GameConfig::MOVE_FINALIZE_COST).is_err() {
                    return Ok(ActionOutcome::failure(format!(
                        "{name} has no AP left to finish the move in progress."
                    )));
                }
                ch.budget.finish_move_action();
                finalize_charge = GameConfig::MOVE_FINALIZE_COST;
                tracing::debug!(actor = actor.0, "finalized pending move for 1 AP");

                if ch.budget.action_points() == 0 {
                    return Ok(ActionOutcome::failure_with_cost(
                        format!("{name} spent the last AP finishing the move; {kind} is lost."),
                        finalize_charge,
                    ));
                }
                if !ch.budget.can_afford(cost) {
                    return Ok(ActionOutcome::failure_with_cost(
                        format!(
                            "After finishing the move, {name} no longer has the {cost} AP \
                             that {kind} requires."
                        ),
                        finalize_charge,
                    ));
                }
            }
        }

        let mut outcome = self.dispatch(dungeon, actor, &request).await?;

        // Central debit: the one place AP leaves the budget. A handler
        // overcharging past the pre-checked budget is a fault.
        let ch = character_mut(dungeon, actor)?;
        if kind.drains_all_ap() && outcome.success {
            outcome.ap_spent = ch.budget.drain();
        } else {
            ch.budget.debit(outcome.ap_spent)?;
        }

        // Vulnerability from a power attack survives only into another
        // power attack.
        if kind != ActionKind::PowerAttack {
            ch.vulnerable = false;
        }

        // A Wizard that ends at 0 AP may cast on its next turn.
        if ch.budget.action_points() == 0 && ch.casts_spells() {
            if let Some(hero) = ch.hero_mut() {
                hero.ready_to_cast = true;
            }
        }

        outcome.ap_spent += finalize_charge;
        tracing::debug!(
            actor = actor.0,
            action = %kind,
            success = outcome.success,
            ap_spent = outcome.ap_spent,
            "action resolved"
        );
        Ok(outcome)
    }

    async fn dispatch(
        &self,
        dungeon: &mut DungeonState,
        actor: CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        use ActionKind::*;

        match request.kind {
            StandardAttack => self.standard_attack(dungeon, actor, request).await,
            PowerAttack => self.power_attack(dungeon, actor, request).await,
            ChargeAttack => self.charge_attack(dungeon, actor, request).await,
            Shove => self.shove(dungeon, actor, request, false).await,
            ShieldBash => self.shove(dungeon, actor, request, true).await,
            StunningStrike => self.stunning_strike(dungeon, actor, request).await,
            DragonBreath => self.dragon_breath(dungeon, actor).await,

            Move => self.move_action(dungeon, actor, request).await,
            EndTurn => self.end_turn(dungeon, actor).await,

            Aim => self.enter_stance(dungeon, actor, crawl_core::Stance::Aiming),
            Parry => self.parry(dungeon, actor),
            SetOverwatch => self.set_overwatch(dungeon, actor),
            StandUp => self.stand_up(dungeon, actor),
            BreakFree => self.break_free(dungeon, actor).await,

            OpenDoor => self.open_door_request(dungeon, actor, request),
            BreakDownDoor => self.break_down_door(dungeon, actor, request).await,
            PickLock => self.pick_lock(dungeon, actor, request).await,
            DisarmTrap => self.disarm_trap(dungeon, actor, request).await,

            SearchFurniture => {
                self.search_spot(dungeon, actor, request, crawl_core::SearchSpotKind::Furniture)
                    .await
            }
            SearchCorpse => {
                self.search_spot(dungeon, actor, request, crawl_core::SearchSpotKind::Corpse)
                    .await
            }
            SearchRoom => self.search_room(dungeon, actor).await,
            HarvestParts => self.harvest_parts(dungeon, actor, request).await,
            PickupWeapon => self.pickup_weapon(dungeon, actor).await,

            EquipGear => self.equip_gear(dungeon, actor, request).await,
            AddItemToQuickSlot => self.add_to_quick_slot(dungeon, actor, request),
            IdentifyItem => self.identify_item(dungeon, actor, request).await,
            ThrowPotion => self.throw_potion(dungeon, actor, request).await,
            DrinkPotion => self.drink_potion(dungeon, actor, request),
            UseTrinket => self.use_trinket(dungeon, actor, request).await,

            HealSelf => self.heal(dungeon, actor, actor, nominal_cost(HealSelf)).await,
            HealOther => self.heal_other(dungeon, actor, request).await,

            Reload => self.reload(dungeon, actor).await,
            ReloadWhileMoving => self.reload_while_moving(dungeon, actor).await,

            CastSpell => self.cast_spell(dungeon, actor, request).await,
            Focus => self.focus(dungeon, actor).await,
            Pray => self.pray(dungeon, actor, request).await,
            UsePerk => self.use_perk(dungeon, actor, request).await,
            Taunt => self.taunt(dungeon, actor, request).await,
        }
    }
}

// ============================================================================
// Shared handler helpers
// ============================================================================

/// Fetches the character or reports the fault.
pub(crate) fn character(
    dungeon: &DungeonState,
    id: CharacterId,
) -> Result<&Character, EngineError> {
    dungeon
        .character(id)
        .ok_or(EngineError::CharacterNotFound(id))
}

/// Fetches the character mutably or reports the fault.
pub(crate) fn character_mut(
    dungeon: &mut DungeonState,
    id: CharacterId,
) -> Result<&mut Character, EngineError> {
    dungeon
        .character_mut(id)
        .ok_or(EngineError::CharacterNotFound(id))
}

/// Failure outcome for a target of the wrong kind. No state mutated,
/// no AP spent.
pub(crate) fn invalid_target(kind: ActionKind) -> ActionOutcome {
    ActionOutcome::failure(format!("Invalid target for {kind}."))
}

/// Failure outcome for a character with no position on the grid.
/// Defensive: missing context is reported, never propagated.
pub(crate) fn missing_position(name: &str) -> ActionOutcome {
    tracing::warn!(character = name, "action requires a grid position");
    ActionOutcome::failure(format!("{name} has no position on the grid."))
}
