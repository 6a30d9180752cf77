//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder for wiring a machine at startup and
//! a macro for declaring enum vocabularies.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
