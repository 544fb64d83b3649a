//! Action-point and movement accounting for one activation.
//!
//! Tracks the AP a character has left and how far it may still move.
//! Two tabletop rules live here: the first move action covers the full
//! movement allotment and the second only half, and switching away from
//! an in-progress move finalizes it (the dispatcher charges 1 AP and
//! calls [`ActivationBudget::finish_move_action`]).

/// Errors raised by AP accounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BudgetError {
    /// A debit would have taken action points below zero.
    #[error("action point debit of {debit} exceeds remaining {remaining}")]
    Overdraft { debit: u32, remaining: u32 },
}

/// Remaining AP and movement for the current activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivationBudget {
    action_points: u32,
    movement_remaining: u32,
    movement_allotment: u32,
    first_move_done: bool,
}

impl ActivationBudget {
    /// Creates a fresh budget for a new activation.
    pub fn new(action_points: u32, movement: u32) -> Self {
        Self {
            action_points,
            movement_remaining: movement,
            movement_allotment: movement,
            first_move_done: false,
        }
    }

    /// Remaining action points.
    pub fn action_points(&self) -> u32 {
        self.action_points
    }

    /// Remaining movement points for the current move action.
    pub fn movement_remaining(&self) -> u32 {
        self.movement_remaining
    }

    /// Movement allotment granted at the start of the activation.
    pub fn movement_allotment(&self) -> u32 {
        self.movement_allotment
    }

    /// Whether the first move action of this activation is complete.
    pub fn first_move_done(&self) -> bool {
        self.first_move_done
    }

    /// Whether `cost` action points can be spent.
    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.action_points
    }

    /// Spends action points; never lets the balance go negative.
    pub fn debit(&mut self, cost: u32) -> Result<(), BudgetError> {
        self.action_points =
            self.action_points
                .checked_sub(cost)
                .ok_or(BudgetError::Overdraft {
                    debit: cost,
                    remaining: self.action_points,
                })?;
        Ok(())
    }

    /// Spends all remaining action points, returning the amount drained.
    ///
    /// Used by SetOverwatch, Parry and EndTurn, which consume the rest
    /// of the activation.
    pub fn drain(&mut self) -> u32 {
        let drained = self.action_points;
        self.action_points = 0;
        drained
    }

    /// Spends movement points (saturating).
    pub fn spend_movement(&mut self, points: u32) {
        self.movement_remaining = self.movement_remaining.saturating_sub(points);
    }

    /// Grants extra movement for the current move action (Sprint).
    pub fn extend_movement(&mut self, points: u32) {
        self.movement_remaining += points;
    }

    /// Whether a move action is in progress but not yet finalized:
    /// movement partially spent and the first-move flag still unset.
    pub fn has_unfinished_move(&self) -> bool {
        !self.first_move_done && self.movement_remaining < self.movement_allotment
    }

    /// Finalizes the current move action.
    ///
    /// Marks the first move done and re-arms the movement pool at half
    /// the allotment (rounded up) for a possible second move.
    pub fn finish_move_action(&mut self) {
        self.first_move_done = true;
        self.movement_remaining = self.movement_allotment.div_ceil(2);
    }

    /// Resets the budget for a new activation.
    pub fn reset_for_activation(&mut self, action_points: u32, movement: u32) {
        *self = Self::new(action_points, movement);
    }
}
