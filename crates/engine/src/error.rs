//! Engine faults.
//!
//! Rule failures (ineligibility, failed tests, cancellations) are never
//! errors; they come back as [`crawl_core::ActionOutcome`] values. The
//! error type below covers genuine faults: a character id that does not
//! resolve, a collaborator that was never wired up, or a handler that
//! tried to overdraw the AP budget.

use crawl_core::{BudgetError, CharacterId};

/// Faults surfaced by the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The acting character is not present in the dungeon state.
    #[error("character {0:?} not found in dungeon state")]
    CharacterNotFound(CharacterId),

    /// A required collaborator was not provided to the dispatcher.
    #[error("{0} collaborator not available")]
    ServiceNotAvailable(&'static str),

    /// A handler reported an AP charge the budget cannot cover. The
    /// central debit is the last line of defense for the AP ≥ 0
    /// invariant.
    #[error("budget violation: {0}")]
    Budget(#[from] BudgetError),
}
