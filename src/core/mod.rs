//! Vocabulary types shared by the engine and its callers.
//!
//! - Identifiers for states and events via the `Identifier` trait
//! - Entry/exit hooks as `Action`s
//! - Per-state metadata in a `DataBag`

mod action;
mod data;
mod state;

pub use action::Action;
pub use data::{DataBag, DataHandle, Value};
pub use state::{Event, Identifier, State};
