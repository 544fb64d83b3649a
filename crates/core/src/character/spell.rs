//! Channeled spell state attached to a hero.
//!
//! A spell cast with one or more Focus Points does not resolve
//! immediately: a [`ChanneledSpell`] is attached to the caster and Focus
//! actions burn it down across one or more activations. The spell
//! resolves exactly once, when `focus_remaining` reaches zero.

use alloc::string::String;

use crate::world::Position;

use super::CharacterId;

/// Reference to a spell definition owned by the casting collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellRef {
    pub name: String,

    /// Quick spells cost 1 AP to cast instead of 2.
    pub quick: bool,
}

impl SpellRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quick: false,
        }
    }

    pub fn quick(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quick: true,
        }
    }
}

/// What a spell is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellTarget {
    None,
    Character(CharacterId),
    Position(Position),
}

/// Casting choices gathered from the player before the cast commits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastingOptions {
    /// Focus points allocated; zero resolves the spell immediately.
    pub focus_points: u32,

    /// Extra mana channeled for a stronger effect.
    pub boosted: bool,
}

/// A spell in the Channeling state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChanneledSpell {
    pub spell: SpellRef,
    pub target: SpellTarget,
    pub options: CastingOptions,

    /// Focus actions still needed before the spell resolves.
    pub focus_remaining: u32,
}

impl ChanneledSpell {
    pub fn new(spell: SpellRef, target: SpellTarget, options: CastingOptions) -> Self {
        let focus_remaining = options.focus_points;
        Self {
            spell,
            target,
            options,
            focus_remaining,
        }
    }
}
