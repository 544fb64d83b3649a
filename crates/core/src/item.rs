//! Weapons and carried items as referenced by actions.
//!
//! Full inventory rules (encumbrance, equip slots, loot tables) belong
//! to external collaborators; the engine only needs enough shape to
//! validate targets and drive the reload and pickup rules.

use alloc::string::String;

/// An equippable weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,

    /// Ranged weapons must be loaded before they fire.
    pub ranged: bool,
    pub loaded: bool,

    /// AP cost of a Reload action with this weapon.
    pub reload_cost: u32,
}

impl Weapon {
    /// Creates a melee weapon.
    pub fn melee(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ranged: false,
            loaded: true,
            reload_cost: 0,
        }
    }

    /// Creates a loaded ranged weapon with the given reload cost.
    pub fn ranged(name: impl Into<String>, reload_cost: u32) -> Self {
        Self {
            name: name.into(),
            ranged: true,
            loaded: true,
            reload_cost,
        }
    }

    pub fn unloaded(mut self) -> Self {
        self.loaded = false;
        self
    }

    /// Whether the weapon must be reloaded before it can fire.
    pub fn needs_reload(&self) -> bool {
        self.ranged && !self.loaded
    }
}

/// Broad item categories referenced by actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Gear,
    Potion,
    Bandage,
    Trinket,
    Part,
    Weapon,
}

/// A carried item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub identified: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            identified: true,
        }
    }

    /// Creates an item whose nature is not yet known.
    pub fn unidentified(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            identified: false,
        }
    }
}
