//! The closed action vocabulary and its request/outcome types.
//!
//! Roughly forty action kinds share one dispatch surface. Requests are
//! transient (built per call); outcomes carry a human-readable message,
//! a success flag and the AP actually charged, which may differ from
//! the nominal table cost (see [`cost`]).

mod cost;

pub use cost::{discounted_cost, nominal_cost};

use alloc::string::String;

use crate::character::{CharacterId, Perk, SpellRef};
use crate::world::{DoorId, Position};

/// Every action a character can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    // Combat
    StandardAttack,
    PowerAttack,
    ChargeAttack,
    Shove,
    ShieldBash,
    StunningStrike,
    DragonBreath,

    // Movement and turn flow
    Move,
    EndTurn,

    // Stances
    Aim,
    Parry,
    SetOverwatch,
    StandUp,

    // Status recovery
    BreakFree,

    // Doors, locks and traps
    OpenDoor,
    BreakDownDoor,
    PickLock,
    DisarmTrap,

    // Searching and scavenging
    SearchFurniture,
    SearchCorpse,
    SearchRoom,
    HarvestParts,
    PickupWeapon,

    // Inventory
    EquipGear,
    AddItemToQuickSlot,
    IdentifyItem,
    ThrowPotion,
    DrinkPotion,
    UseTrinket,

    // Healing
    HealSelf,
    HealOther,

    // Ranged upkeep
    Reload,
    ReloadWhileMoving,

    // Casting and powers
    CastSpell,
    Focus,
    Pray,
    UsePerk,
    Taunt,
}

impl ActionKind {
    /// The only actions a Frenzied character may take.
    pub fn allowed_while_frenzied(&self) -> bool {
        matches!(
            self,
            ActionKind::StandardAttack | ActionKind::Move | ActionKind::EndTurn
        )
    }

    /// Actions that consume all remaining AP instead of a fixed cost.
    pub fn drains_all_ap(&self) -> bool {
        matches!(
            self,
            ActionKind::SetOverwatch | ActionKind::EndTurn | ActionKind::Parry
        )
    }
}

/// Polymorphic action target, validated per action kind by its handler.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionTarget {
    None,
    Character(CharacterId),
    Position(Position),
    Door(DoorId),
    /// Index into the acting hero's backpack.
    Item(usize),
    Spell(SpellRef),
    Prayer(String),
    Perk(Perk),
}

/// A requested action: kind, primary target and optional secondary
/// target (e.g. the spell being cast alongside its victim).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub target: ActionTarget,
    pub secondary: ActionTarget,
}

impl ActionRequest {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            target: ActionTarget::None,
            secondary: ActionTarget::None,
        }
    }

    pub fn with_target(mut self, target: ActionTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_secondary(mut self, secondary: ActionTarget) -> Self {
        self.secondary = secondary;
        self
    }
}

/// The result of one dispatched action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub message: String,
    pub success: bool,

    /// AP actually charged, which the dispatcher debits. Zero for
    /// rejected or cancelled actions; may exceed or undercut the
    /// nominal cost per the override rules.
    pub ap_spent: u32,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>, ap_spent: u32) -> Self {
        Self {
            message: message.into(),
            success: true,
            ap_spent,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            ap_spent: 0,
        }
    }

    /// A failure that still consumed AP (mechanical failures, partial
    /// completions, sub-action fallbacks).
    pub fn failure_with_cost(message: impl Into<String>, ap_spent: u32) -> Self {
        Self {
            message: message.into(),
            success: false,
            ap_spent,
        }
    }
}
