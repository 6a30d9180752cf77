//! The state machine engine.
//!
//! The engine keeps a registry of state descriptors, the transition table
//! they carry, and the current-state register, all behind a single lock.

mod descriptor;
mod error;
mod state_machine;

pub use error::{MachineError, Result};
pub use state_machine::{Lifecycle, StateMachine, Transition};
