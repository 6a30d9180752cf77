//! Errors raised while assembling a machine.

use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state '{state}' is never declared. Add a transition, hook or data for it")]
    UnknownInitialState { state: String },

    #[error("Placing the initial state failed: {0}")]
    Machine(#[from] MachineError),
}
