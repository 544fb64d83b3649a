//! Action resolution engine for the dungeon crawl.
//!
//! The engine sits between a front end (or an AI controller) and the
//! pure state model in `crawl-core`. Callers submit an
//! [`crawl_core::ActionRequest`]; [`ActionDispatcher::perform_action`]
//! validates it, drives the external collaborators in [`services`] for
//! dice, combat math, pathfinding and prompts, mutates the dungeon
//! state and reports an [`crawl_core::ActionOutcome`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 Front end                   │
//! │   (UI, AI controller, scripted scenario)    │
//! └──────────────────────┬──────────────────────┘
//!                        │ ActionRequest
//! ┌──────────────────────▼──────────────────────┐
//! │              ActionDispatcher               │
//! │  guards → per-kind handler → central debit  │
//! └──────────────────────┬──────────────────────┘
//!                        │ trait calls
//! ┌──────────────────────▼──────────────────────┐
//! │           Services (collaborators)          │
//! │  combat · grid · casting · dice · healing   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Collaborators may suspend (awaiting player input); the dispatcher
//! holds `&mut DungeonState` across every suspension point, so an
//! activation is atomic with respect to other mutation.

pub mod dispatcher;
pub mod error;
pub mod services;

pub use dispatcher::ActionDispatcher;
pub use error::EngineError;
pub use services::{
    ActivationOutcome, AttackOutcome, CastAttempt, ChargeOutcome, CombatResolver, GridOracle,
    HealOutcome, Healer, Identifier, Interaction, Inventory, Locksmith, MovementWatcher,
    PowerActivator, Services, ShoveOutcome, Spellcaster, StatusApplier,
};
