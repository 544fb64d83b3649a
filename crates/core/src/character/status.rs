//! Status effect ledger for characters.
//!
//! Status effects are timed or conditional modifiers that gate or alter
//! the actions available to a character (Frenzy restricts the action
//! set, Battle Fury discounts power attacks, Entangle blocks movement).
//!
//! # Turn-based duration
//!
//! Effects store `remaining_turns`, decremented once per activation via
//! [`StatusEffects::tick_down`]. A duration of [`UNTIL_REMOVED`] (−1)
//! means the effect persists until explicitly removed.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Duration sentinel for effects that never expire on their own.
pub const UNTIL_REMOVED: i32 = -1;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Only StandardAttack, Move and EndTurn are permitted; a hit lets
    /// the character act again at no AP cost.
    Frenzy,

    /// Reaction stance marker; lets the character interrupt enemy moves.
    Overwatch,

    /// Cannot move until a strength test is passed; the test gets harder
    /// every turn the effect is held.
    Entangled,

    /// Forced to pursue the character recorded in `taunted_by`.
    Taunt,

    /// Movement bonus that applies only to the very first move action.
    Sprint,

    /// Power attacks cost 1 AP instead of 2.
    BattleFury,

    /// Breath weapon is charged and may be unleashed.
    DragonBreath,

    /// Improved throwing arm; bonus on thrown-potion tests.
    Pitcher,

    /// Hunter's Eye is primed; ranged attacks may squeeze off a bonus shot.
    HuntersEye,

    /// Cannot act.
    Stunned,

    /// HP loss over time.
    Poisoned,
}

/// A single active status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatusEffect {
    pub kind: StatusKind,

    /// Turns left before the effect expires; [`UNTIL_REMOVED`] for
    /// effects that only go away when something removes them.
    pub remaining_turns: i32,

    /// Number of activations this effect has already been held for.
    /// Drives the escalating Entangle escape difficulty.
    pub turns_held: u32,

    /// Cleared when the party leaves the dungeon rather than on a timer.
    pub remove_at_dungeon_end: bool,
}

impl ActiveStatusEffect {
    /// Creates an effect lasting `turns` activations.
    pub fn timed(kind: StatusKind, turns: i32) -> Self {
        Self {
            kind,
            remaining_turns: turns,
            turns_held: 0,
            remove_at_dungeon_end: false,
        }
    }

    /// Creates an effect that persists until explicitly removed.
    pub fn until_removed(kind: StatusKind) -> Self {
        Self::timed(kind, UNTIL_REMOVED)
    }

    /// Marks the effect for removal at the end of the dungeon.
    pub fn lasting_dungeon(mut self) -> Self {
        self.remove_at_dungeon_end = true;
        self
    }

    fn expired(&self) -> bool {
        self.remaining_turns == 0
    }
}

/// Active status effects on a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<ActiveStatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks whether a status effect of the given kind is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Returns the active effect of the given kind, if any.
    pub fn get(&self, kind: StatusKind) -> Option<&ActiveStatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Adds a status effect.
    ///
    /// If an effect of the same kind is already active, the longer
    /// duration wins; [`UNTIL_REMOVED`] always wins.
    pub fn add(&mut self, effect: ActiveStatusEffect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            if existing.remaining_turns == UNTIL_REMOVED || effect.remaining_turns == UNTIL_REMOVED
            {
                existing.remaining_turns = UNTIL_REMOVED;
            } else {
                existing.remaining_turns = existing.remaining_turns.max(effect.remaining_turns);
            }
            existing.remove_at_dungeon_end |= effect.remove_at_dungeon_end;
            return;
        }

        // Bounded ledger: excess effects are dropped on the floor
        if !self.effects.is_full() {
            self.effects.push(effect);
        }
    }

    /// Removes a status effect immediately.
    ///
    /// Returns true if the effect was present.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    /// Advances all effects by one activation.
    ///
    /// Positive durations are decremented and expired effects dropped;
    /// [`UNTIL_REMOVED`] effects are never touched. Every surviving
    /// effect records one more turn held.
    pub fn tick_down(&mut self) {
        for effect in self.effects.iter_mut() {
            if effect.remaining_turns > 0 {
                effect.remaining_turns -= 1;
            }
            effect.turns_held += 1;
        }
        self.effects.retain(|e| !e.expired());
    }

    /// Removes all effects flagged for removal at the end of the dungeon.
    pub fn end_of_dungeon(&mut self) {
        self.effects.retain(|e| !e.remove_at_dungeon_end);
    }

    /// Strength-test modifier for breaking free of Entangle.
    ///
    /// The test gets 10 points harder for every activation the effect
    /// has already been held: 0 on the turn it lands, −10 the next, and
    /// so on. Returns `None` when the character is not entangled.
    pub fn entangle_escape_modifier(&self) -> Option<i32> {
        self.get(StatusKind::Entangled)
            .map(|e| -10 * e.turns_held as i32)
    }

    /// Returns an iterator over all active effects.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatusEffect> {
        self.effects.iter()
    }

    /// Returns true if no status effects are active.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
