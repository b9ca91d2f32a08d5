// Rust guideline compliant 2026-10-19

//! Finite State Machine module for borrow record states.
//!
//! A record has exactly one transition:
//!
//! - Active → Returned
//!
//! Returned is terminal. Nothing re-enters Active.

use crate::{Error, RecordId, RecordState, Result};

impl RecordState {
    /// Checks if a transition to the target state is valid.
    ///
    /// # Arguments
    ///
    /// * `target` - The target state to transition to
    /// * `record_id` - Record being transitioned, used in error messages
    ///
    /// # Errors
    ///
    /// Returns `AlreadyReturned` when a returned record is returned again,
    /// and `InvalidRequest` for any other transition outside the FSM.
    pub fn can_transition_to(&self, target: RecordState, record_id: &RecordId) -> Result<()> {
        match (self, target) {
            (RecordState::Active, RecordState::Returned) => Ok(()),
            (RecordState::Returned, RecordState::Returned) => {
                Err(Error::AlreadyReturned(record_id.to_string()))
            }
            (from, to) => Err(Error::InvalidRequest(format!(
                "Cannot transition record {} from {:?} to {:?}",
                record_id, from, to
            ))),
        }
    }

    /// Returns the list of valid target states for the current state.
    pub fn valid_transitions(&self) -> Vec<RecordState> {
        match self {
            RecordState::Active => vec![RecordState::Returned],
            RecordState::Returned => Vec::new(),
        }
    }

    /// Returns true if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
