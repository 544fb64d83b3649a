//! Spellcasting and perk/prayer collaborator contracts.
//!
//! Options gathering and perk prompts go through the player, so every
//! method here is a suspension point. Mana and Energy bookkeeping
//! belong to the collaborators; the dispatcher only reacts to the
//! outcome values.

use async_trait::async_trait;
use crawl_core::{CastingOptions, CharacterId, DungeonState, Perk, SpellRef, SpellTarget};

/// Whether a cast could be funded from the caster's mana.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastAttempt {
    Funded,
    InsufficientMana,
}

/// External spellcasting collaborator.
#[async_trait]
pub trait Spellcaster: Send + Sync {
    /// Gathers casting options from the player. `None` means the player
    /// cancelled; nothing has been spent at that point.
    async fn request_casting_options(
        &self,
        dungeon: &DungeonState,
        caster: CharacterId,
        spell: &SpellRef,
    ) -> Option<CastingOptions>;

    /// Commits the mana cost of the cast.
    async fn cast_spell(
        &self,
        dungeon: &mut DungeonState,
        caster: CharacterId,
        spell: &SpellRef,
        options: &CastingOptions,
    ) -> CastAttempt;

    /// Resolves the spell's effect and reports what happened.
    async fn resolve_spell(
        &self,
        dungeon: &mut DungeonState,
        caster: CharacterId,
        spell: &SpellRef,
        target: &SpellTarget,
        options: &CastingOptions,
    ) -> String;
}

/// Result of a perk or prayer activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivationOutcome {
    pub success: bool,
    pub message: String,
}

/// External perk and prayer activation. Consumes Energy even when the
/// activation fails.
#[async_trait]
pub trait PowerActivator: Send + Sync {
    async fn activate_perk(
        &self,
        dungeon: &mut DungeonState,
        who: CharacterId,
        perk: Perk,
    ) -> ActivationOutcome;

    async fn activate_prayer(
        &self,
        dungeon: &mut DungeonState,
        who: CharacterId,
        prayer: &str,
    ) -> ActivationOutcome;

    /// Yes/no prompt for an optional perk trigger (e.g. Hunter's Eye).
    async fn request_perk_activation(
        &self,
        dungeon: &DungeonState,
        who: CharacterId,
        perk: Perk,
    ) -> bool;
}
