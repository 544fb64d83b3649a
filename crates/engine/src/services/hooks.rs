//! Movement interruption hook.
//!
//! The one place where a reaction fires *before* a state change
//! commits: an enemy in Overwatch stance may veto a move while the
//! mover's position is still untouched.

use async_trait::async_trait;
use crawl_core::{CharacterId, DungeonState, Position};

/// Pre-commit movement reaction hook.
#[async_trait]
pub trait MovementWatcher: Send + Sync {
    /// Called with the planned path before any position changes.
    /// Returning true interrupts the move; nothing is committed.
    async fn on_movement(
        &self,
        dungeon: &DungeonState,
        mover: CharacterId,
        path: &[Position],
    ) -> bool;
}
