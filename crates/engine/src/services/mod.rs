//! Collaborator contracts consumed by the dispatcher.
//!
//! Everything the rules treat as external (combat math, pathfinding,
//! casting prompts, dice, healing, locks) sits behind the traits in
//! this module. The [`Services`] aggregate bundles them so handlers can
//! reach every collaborator without hard coupling to concrete
//! implementations; accessors fail with a descriptive
//! [`EngineError::ServiceNotAvailable`] when a collaborator was never
//! wired up.

mod casting;
mod combat;
mod grid;
mod hooks;
mod interaction;
mod support;

pub use casting::{ActivationOutcome, CastAttempt, PowerActivator, Spellcaster};
pub use combat::{AttackOutcome, ChargeOutcome, CombatResolver, ShoveOutcome};
pub use grid::GridOracle;
pub use hooks::MovementWatcher;
pub use interaction::Interaction;
pub use support::{HealOutcome, Healer, Identifier, Inventory, Locksmith, StatusApplier};

use std::sync::Arc;

use crate::error::EngineError;

/// Aggregates the external collaborators required by the dispatcher.
#[derive(Clone, Default)]
pub struct Services {
    combat: Option<Arc<dyn CombatResolver>>,
    grid: Option<Arc<dyn GridOracle>>,
    caster: Option<Arc<dyn Spellcaster>>,
    powers: Option<Arc<dyn PowerActivator>>,
    interaction: Option<Arc<dyn Interaction>>,
    healer: Option<Arc<dyn Healer>>,
    inventory: Option<Arc<dyn Inventory>>,
    identifier: Option<Arc<dyn Identifier>>,
    locksmith: Option<Arc<dyn Locksmith>>,
    status: Option<Arc<dyn StatusApplier>>,
    watcher: Option<Arc<dyn MovementWatcher>>,
}

impl Services {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_combat(mut self, combat: Arc<dyn CombatResolver>) -> Self {
        self.combat = Some(combat);
        self
    }

    pub fn with_grid(mut self, grid: Arc<dyn GridOracle>) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_caster(mut self, caster: Arc<dyn Spellcaster>) -> Self {
        self.caster = Some(caster);
        self
    }

    pub fn with_powers(mut self, powers: Arc<dyn PowerActivator>) -> Self {
        self.powers = Some(powers);
        self
    }

    pub fn with_interaction(mut self, interaction: Arc<dyn Interaction>) -> Self {
        self.interaction = Some(interaction);
        self
    }

    pub fn with_healer(mut self, healer: Arc<dyn Healer>) -> Self {
        self.healer = Some(healer);
        self
    }

    pub fn with_inventory(mut self, inventory: Arc<dyn Inventory>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn with_identifier(mut self, identifier: Arc<dyn Identifier>) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn with_locksmith(mut self, locksmith: Arc<dyn Locksmith>) -> Self {
        self.locksmith = Some(locksmith);
        self
    }

    pub fn with_status(mut self, status: Arc<dyn StatusApplier>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_watcher(mut self, watcher: Arc<dyn MovementWatcher>) -> Self {
        self.watcher = Some(watcher);
        self
    }

    /// Returns the combat resolver, or an error if not available.
    pub fn combat(&self) -> Result<&dyn CombatResolver, EngineError> {
        self.combat
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("combat"))
    }

    /// Returns the grid oracle, or an error if not available.
    pub fn grid(&self) -> Result<&dyn GridOracle, EngineError> {
        self.grid
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("grid"))
    }

    /// Returns the spellcaster, or an error if not available.
    pub fn caster(&self) -> Result<&dyn Spellcaster, EngineError> {
        self.caster
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("spellcaster"))
    }

    /// Returns the perk/prayer activator, or an error if not available.
    pub fn powers(&self) -> Result<&dyn PowerActivator, EngineError> {
        self.powers
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("powers"))
    }

    /// Returns the interaction collaborator, or an error if not available.
    pub fn interaction(&self) -> Result<&dyn Interaction, EngineError> {
        self.interaction
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("interaction"))
    }

    /// Returns the healer, or an error if not available.
    pub fn healer(&self) -> Result<&dyn Healer, EngineError> {
        self.healer
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("healer"))
    }

    /// Returns the inventory collaborator, or an error if not available.
    pub fn inventory(&self) -> Result<&dyn Inventory, EngineError> {
        self.inventory
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("inventory"))
    }

    /// Returns the identifier, or an error if not available.
    pub fn identifier(&self) -> Result<&dyn Identifier, EngineError> {
        self.identifier
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("identifier"))
    }

    /// Returns the lock collaborator, or an error if not available.
    pub fn locksmith(&self) -> Result<&dyn Locksmith, EngineError> {
        self.locksmith
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("locksmith"))
    }

    /// Returns the status applier, or an error if not available.
    pub fn status(&self) -> Result<&dyn StatusApplier, EngineError> {
        self.status
            .as_deref()
            .ok_or(EngineError::ServiceNotAvailable("status"))
    }

    /// Returns the movement hook if one is registered. A missing hook
    /// simply means moves are never interrupted.
    pub fn watcher(&self) -> Option<&dyn MovementWatcher> {
        self.watcher.as_deref()
    }
}
