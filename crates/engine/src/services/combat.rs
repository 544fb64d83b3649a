//! Combat-resolution collaborator contract.
//!
//! Hit and damage math live outside this crate; the dispatcher only
//! consumes outcome values and applies the positional side effects the
//! resolver reports (a shoved target's new room, an attacker's room
//! after the forced move of a charge).

use async_trait::async_trait;
use crawl_core::{CharacterId, DungeonState, Position, RoomId};

/// Result of a standard, power or stunning attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub hit: bool,
    pub message: String,
}

impl AttackOutcome {
    pub fn hit(message: impl Into<String>) -> Self {
        Self {
            hit: true,
            message: message.into(),
        }
    }

    pub fn miss(message: impl Into<String>) -> Self {
        Self {
            hit: false,
            message: message.into(),
        }
    }
}

/// Result of a shove or shield bash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShoveOutcome {
    pub hit: bool,
    pub message: String,

    /// Room the target was pushed into, when the push crossed a
    /// threshold. The dispatcher applies the relocation.
    pub target_room: Option<RoomId>,
}

/// Result of a charge attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChargeOutcome {
    pub hit: bool,
    pub message: String,

    /// Room the attacker ended up in after the forced move component.
    pub attacker_room: Option<RoomId>,
}

/// External combat resolver.
#[async_trait]
pub trait CombatResolver: Send + Sync {
    async fn standard_attack(
        &self,
        dungeon: &mut DungeonState,
        attacker: CharacterId,
        target: CharacterId,
    ) -> AttackOutcome;

    async fn power_attack(
        &self,
        dungeon: &mut DungeonState,
        attacker: CharacterId,
        target: CharacterId,
    ) -> AttackOutcome;

    async fn charge_attack(
        &self,
        dungeon: &mut DungeonState,
        attacker: CharacterId,
        target: CharacterId,
    ) -> ChargeOutcome;

    async fn shove(
        &self,
        dungeon: &mut DungeonState,
        attacker: CharacterId,
        target: CharacterId,
    ) -> ShoveOutcome;

    async fn stunning_strike(
        &self,
        dungeon: &mut DungeonState,
        attacker: CharacterId,
        target: CharacterId,
    ) -> AttackOutcome;

    /// Rolls breath damage against the chosen squares and reports what
    /// happened. Mutates HP of whoever stands there.
    async fn breath_attack(
        &self,
        dungeon: &mut DungeonState,
        attacker: CharacterId,
        squares: &[Position],
    ) -> String;
}
