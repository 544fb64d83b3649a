//! Characters: heroes and monsters.
//!
//! A [`Character`] bundles everything an activation mutates: the AP and
//! movement budget, HP/Energy/Mana meters, the combat stance, the
//! status-effect ledger, equipped and dropped weapons, and room
//! occupancy. Hero-only state (class, perks, backpack, channeled spell)
//! lives in [`HeroState`]; handlers query capabilities
//! ([`Character::has_inventory`], [`Character::casts_spells`]) rather
//! than branching on the concrete kind.

mod budget;
mod spell;
mod status;

pub use budget::{ActivationBudget, BudgetError};
pub use spell::{CastingOptions, ChanneledSpell, SpellRef, SpellTarget};
pub use status::{ActiveStatusEffect, StatusEffects, StatusKind, UNTIL_REMOVED};

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::GameConfig;
use crate::item::{Item, Weapon};
use crate::world::{Position, RoomId};

/// Identifies a character within a [`crate::world::DungeonState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

/// A resource pool with a current and maximum value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    max: u32,
}

impl ResourceMeter {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Spends up to `amount`, returning what was actually spent.
    pub fn spend(&mut self, amount: u32) -> u32 {
        let spent = amount.min(self.current);
        self.current -= spent;
        spent
    }

    /// Restores up to `amount`, clamped at the maximum.
    pub fn restore(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Persistent combat modes selected via actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stance {
    #[default]
    Normal,
    Aiming,
    Parry,
    Overwatch,
    Prone,
}

/// Hero classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeroClass {
    Warrior,
    Hunter,
    Wizard,
    Priest,
    Rogue,
}

/// Perks a hero may have learned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Perk {
    Taunt,
    HuntersEye,
    BattleFury,
    SecondWind,
}

/// Hero-only state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroState {
    pub class: HeroClass,
    pub perks: Vec<Perk>,
    pub backpack: Vec<Item>,
    pub quick_slots: arrayvec::ArrayVec<Item, { GameConfig::MAX_QUICK_SLOTS }>,
    pub bandages: u32,

    /// Set when a Wizard ends an activation at 0 AP; cleared on cast.
    pub ready_to_cast: bool,

    /// At most one channeled spell may be active per hero.
    pub channeled: Option<ChanneledSpell>,
}

impl HeroState {
    pub fn new(class: HeroClass) -> Self {
        Self {
            class,
            perks: Vec::new(),
            backpack: Vec::new(),
            quick_slots: arrayvec::ArrayVec::new(),
            bandages: 0,
            ready_to_cast: false,
            channeled: None,
        }
    }

    pub fn has_perk(&self, perk: Perk) -> bool {
        self.perks.contains(&perk)
    }
}

/// Monster-only state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    /// Revealed monsters exert zone of control over hero movement.
    pub revealed: bool,
}

/// Hero or monster discriminant with kind-specific state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    Hero(HeroState),
    Monster(MonsterState),
}

/// A hero or monster taking part in the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,

    pub budget: ActivationBudget,
    pub hp: ResourceMeter,
    pub energy: ResourceMeter,
    pub mana: ResourceMeter,

    pub stance: Stance,
    pub statuses: StatusEffects,

    pub weapon: Option<Weapon>,

    /// Set when disarmed; cleared again by PickupWeapon.
    pub dropped_weapon: Option<Weapon>,

    pub room: Option<RoomId>,
    pub position: Option<Position>,

    /// Set by PowerAttack, cleared by any following action that is not
    /// itself a PowerAttack.
    pub vulnerable: bool,

    /// Back-reference set when a Taunt lands on this character.
    pub taunted_by: Option<CharacterId>,
}

impl Character {
    /// Creates a hero with default meters and budget.
    pub fn new_hero(name: impl Into<String>, class: HeroClass) -> Self {
        Self::new(name, CharacterKind::Hero(HeroState::new(class)))
    }

    /// Creates a revealed monster with default meters and budget.
    pub fn new_monster(name: impl Into<String>) -> Self {
        Self::new(
            name,
            CharacterKind::Monster(MonsterState { revealed: true }),
        )
    }

    fn new(name: impl Into<String>, kind: CharacterKind) -> Self {
        Self {
            id: CharacterId(0),
            name: name.into(),
            kind,
            budget: ActivationBudget::new(
                GameConfig::DEFAULT_ACTION_POINTS,
                GameConfig::DEFAULT_MOVEMENT,
            ),
            hp: ResourceMeter::full(10),
            energy: ResourceMeter::full(3),
            mana: ResourceMeter::full(0),
            stance: Stance::Normal,
            statuses: StatusEffects::empty(),
            weapon: None,
            dropped_weapon: None,
            room: None,
            position: None,
            vulnerable: false,
            taunted_by: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_budget(mut self, action_points: u32, movement: u32) -> Self {
        self.budget = ActivationBudget::new(action_points, movement);
        self
    }

    pub fn with_mana(mut self, mana: u32) -> Self {
        self.mana = ResourceMeter::full(mana);
        self
    }

    // ========================================================================
    // Capability queries
    // ========================================================================

    pub fn is_hero(&self) -> bool {
        matches!(self.kind, CharacterKind::Hero(_))
    }

    /// Whether this character carries a backpack and quick slots.
    pub fn has_inventory(&self) -> bool {
        self.is_hero()
    }

    /// Whether this character can cast and channel spells.
    pub fn casts_spells(&self) -> bool {
        matches!(&self.kind, CharacterKind::Hero(h) if h.class == HeroClass::Wizard)
    }

    /// Whether this character can call on prayers.
    pub fn prays(&self) -> bool {
        matches!(&self.kind, CharacterKind::Hero(h) if h.class == HeroClass::Priest)
    }

    /// Whether this character has an Energy pool to fund perks.
    pub fn has_energy(&self) -> bool {
        self.is_hero()
    }

    pub fn hero(&self) -> Option<&HeroState> {
        match &self.kind {
            CharacterKind::Hero(h) => Some(h),
            CharacterKind::Monster(_) => None,
        }
    }

    pub fn hero_mut(&mut self) -> Option<&mut HeroState> {
        match &mut self.kind {
            CharacterKind::Hero(h) => Some(h),
            CharacterKind::Monster(_) => None,
        }
    }

    pub fn has_perk(&self, perk: Perk) -> bool {
        self.hero().is_some_and(|h| h.has_perk(perk))
    }
}
