//! Grid and pathfinding collaborator contract.
//!
//! Pure geometry queries plus one mutating commit call. The zone of
//! control passed to [`GridOracle::find_shortest_path`] is the set of
//! opposing-character positions whose adjacency constrains the path.

use crawl_core::{CharacterId, DungeonState, Position};

/// External grid geometry and pathfinding.
pub trait GridOracle: Send + Sync {
    /// Shortest path from `from` to `to` honoring zone of control.
    /// The returned path excludes `from`. `None` when unreachable.
    fn find_shortest_path(
        &self,
        dungeon: &DungeonState,
        from: Position,
        to: Position,
        zoc: &[Position],
    ) -> Option<Vec<Position>>;

    /// Commits a walk along `path`, updating the mover's position.
    /// Returns the movement points actually spent; the walk may stop
    /// short of the full path if an obstacle appears.
    fn move_character(
        &self,
        dungeon: &mut DungeonState,
        mover: CharacterId,
        path: &[Position],
    ) -> u32;

    fn is_adjacent(&self, a: Position, b: Position) -> bool;

    fn neighbors(&self, position: Position) -> Vec<Position>;

    fn has_line_of_sight(&self, dungeon: &DungeonState, from: Position, to: Position) -> bool;
}
