//! Rule data types for the action resolution engine.
//!
//! `crawl-core` defines the canonical game state (characters, status
//! effects, action-point accounting, rooms and doors) and the closed
//! vocabulary of actions with their nominal AP costs. Everything here is
//! pure and synchronous; the asynchronous dispatcher in `crawl-engine`
//! mutates this state through the types re-exported below.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod action;
pub mod character;
pub mod config;
pub mod item;
pub mod world;

pub use action::{
    ActionKind, ActionOutcome, ActionRequest, ActionTarget, discounted_cost, nominal_cost,
};
pub use character::{
    ActivationBudget, ActiveStatusEffect, BudgetError, CastingOptions, ChanneledSpell, Character,
    CharacterId, CharacterKind, HeroClass, HeroState, MonsterState, Perk, ResourceMeter, SpellRef,
    SpellTarget, Stance, StatusEffects, StatusKind,
};
pub use config::GameConfig;
pub use item::{Item, ItemKind, Weapon};
pub use world::{
    Door, DoorId, DoorState, DungeonState, Position, Room, RoomId, SearchSpot, SearchSpotKind,
    Trap,
};
