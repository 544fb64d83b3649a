//! Movement planning and execution.
//!
//! Resolves a move request into an executed path: available movement
//! honors the full/half distance rule, zone of control comes from the
//! opposing faction, and the Overwatch hook gets a veto before any
//! position commits. Partial walks spend only the points actually
//! moved; an unloaded ranged weapon gets a free reload attempt on the
//! way.

use crawl_core::{
    ActionKind, ActionOutcome, ActionRequest, ActionTarget, DungeonState, GameConfig, StatusKind,
};

use super::{ActionDispatcher, character, character_mut, invalid_target, missing_position};
use crate::error::EngineError;

impl ActionDispatcher {
    pub(super) async fn move_action(
        &self,
        dungeon: &mut DungeonState,
        actor: crawl_core::CharacterId,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, EngineError> {
        let ActionTarget::Position(dest) = request.target else {
            return Ok(invalid_target(ActionKind::Move));
        };

        let (name, from) = {
            let ch = character(dungeon, actor)?;
            (ch.name.clone(), ch.position)
        };
        let Some(from) = from else {
            return Ok(missing_position(&name));
        };

        // Entangled characters stay put until they break free.
        if character(dungeon, actor)?
            .statuses
            .has(StatusKind::Entangled)
        {
            return Ok(ActionOutcome::failure(format!(
                "{name} is entangled and must break free before moving."
            )));
        }

        // Sprint extends the very first move of the activation.
        {
            let ch = character_mut(dungeon, actor)?;
            if ch.statuses.has(StatusKind::Sprint)
                && !ch.budget.first_move_done()
                && ch.budget.movement_remaining() == ch.budget.movement_allotment()
            {
                ch.budget
                    .extend_movement(GameConfig::SPRINT_BONUS_MOVEMENT);
            }
        }

        let available = character(dungeon, actor)?.budget.movement_remaining();
        if available == 0 {
            return Ok(ActionOutcome::failure(format!(
                "{name} has no movement left this activation."
            )));
        }

        let zoc = dungeon.opposition_positions(actor);
        let grid = self.services().grid()?;
        let Some(mut path) = grid.find_shortest_path(dungeon, from, dest, &zoc) else {
            return Ok(ActionOutcome::failure(format!(
                "{name} can find no path to that square."
            )));
        };
        if path.is_empty() {
            return Ok(ActionOutcome::failure(format!(
                "{name} is already standing there."
            )));
        }
        let requested = path.len();
        path.truncate(available as usize);

        // Interruption hook fires before anything commits; on a veto the
        // mover has not taken a single step.
        if let Some(watcher) = self.services().watcher()
            && watcher.on_movement(dungeon, actor, &path).await
        {
            tracing::debug!(actor = actor.0, "move vetoed by overwatch reaction");
            return Ok(ActionOutcome::failure("Movement interrupted by Overwatch!"));
        }

        let spent = grid.move_character(dungeon, actor, &path);
        character_mut(dungeon, actor)?.budget.spend_movement(spent);

        // Free reload attempt while on the move.
        let needs_reload = character(dungeon, actor)?
            .weapon
            .as_ref()
            .is_some_and(|w| w.needs_reload());
        let mut reload_note = String::new();
        if needs_reload {
            let sub = self.reload_while_moving(dungeon, actor).await?;
            if sub.success {
                reload_note = format!(" {}", sub.message);
            }
        }

        let ch = character_mut(dungeon, actor)?;
        if ch.budget.movement_remaining() == 0 {
            // Movement pool exhausted: the move action is complete and
            // the half-distance second move becomes available.
            ch.statuses.remove(StatusKind::Sprint);
            ch.budget.finish_move_action();
            return Ok(ActionOutcome::success(
                format!("{name} moved {spent} squares, completing the move.{reload_note}"),
                1,
            ));
        }

        let remaining = ch.budget.movement_remaining();
        if (spent as usize) < path.len() || path.len() < requested {
            return Ok(ActionOutcome::success(
                format!(
                    "{name} moved {spent} squares before being stopped \
                     ({remaining} movement left).{reload_note}"
                ),
                0,
            ));
        }

        Ok(ActionOutcome::success(
            format!("{name} moved {spent} squares ({remaining} movement left).{reload_note}"),
            0,
        ))
    }
}
