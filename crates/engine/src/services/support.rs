//! Small single-operation collaborator contracts: healing, inventory,
//! identification, locks and status application.

use async_trait::async_trait;
use crawl_core::{ActiveStatusEffect, CharacterId, DoorId, DungeonState, Item};

/// Result of a bandage application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealOutcome {
    pub success: bool,
    pub message: String,
}

/// External healing collaborator. The bandage itself is consumed by the
/// dispatcher before the roll; a failed roll does not refund it.
#[async_trait]
pub trait Healer: Send + Sync {
    async fn apply_bandage(
        &self,
        dungeon: &mut DungeonState,
        healer: CharacterId,
        target: CharacterId,
    ) -> HealOutcome;
}

/// External inventory collaborator; owns the equip rules.
#[async_trait]
pub trait Inventory: Send + Sync {
    async fn equip_item(&self, dungeon: &mut DungeonState, who: CharacterId, item: &Item) -> bool;
}

/// External identification collaborator.
#[async_trait]
pub trait Identifier: Send + Sync {
    async fn identify_item(
        &self,
        dungeon: &mut DungeonState,
        who: CharacterId,
        item: &Item,
    ) -> String;
}

/// External lock collaborator, used when a door is bashed.
#[async_trait]
pub trait Locksmith: Send + Sync {
    async fn bash_lock(&self, dungeon: &mut DungeonState, who: CharacterId, door: DoorId) -> bool;
}

/// External status application; the target may resist.
#[async_trait]
pub trait StatusApplier: Send + Sync {
    /// Returns false when the effect was resisted.
    async fn attempt_to_apply_status(
        &self,
        dungeon: &mut DungeonState,
        source: CharacterId,
        target: CharacterId,
        effect: ActiveStatusEffect,
    ) -> bool;
}
