//! Static rule constants shared by both crates.

/// Compile-time game configuration.
///
/// Values that the tabletop rules fix and that never change at runtime.
pub struct GameConfig;

impl GameConfig {
    /// Maximum number of simultaneously active status effects per character.
    pub const MAX_STATUS_EFFECTS: usize = 16;

    /// Quick-slot capacity for heroes.
    pub const MAX_QUICK_SLOTS: usize = 3;

    /// AP charged when a non-Move action finalizes an unfinished move.
    pub const MOVE_FINALIZE_COST: u32 = 1;

    /// AP cost of casting a spell with the "quick" property.
    pub const QUICK_SPELL_COST: u32 = 1;

    /// AP cost of casting any other spell.
    pub const FULL_SPELL_COST: u32 = 2;

    /// Default action points granted at the start of an activation.
    pub const DEFAULT_ACTION_POINTS: u32 = 2;

    /// Default movement allotment granted at the start of an activation.
    pub const DEFAULT_MOVEMENT: u32 = 4;

    /// Extra movement granted by Sprint on the first move action.
    pub const SPRINT_BONUS_MOVEMENT: u32 = 2;
}
