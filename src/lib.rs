//! Turnstile: an embeddable finite state machine engine
//!
//! The host declares states, events and transitions, attaches entry and exit
//! hooks, and then drives the machine one event at a time. The engine owns
//! the transition table and the current state; the host owns the vocabulary
//! and whatever the hooks do.
//!
//! # Core Concepts
//!
//! - **Identifiers**: states and events are opaque, ordered values (`State`,
//!   `Event`, or any type implementing `Identifier`)
//! - **Transitions**: event-labelled edges; a source has at most one target
//!   per event
//! - **Hooks**: `Action`s run on entering or leaving a state
//! - **Data**: a free-form `DataBag` attached to every state
//!
//! # Concurrency
//!
//! A `StateMachine` is `Send + Sync`. Every call takes the machine's single
//! lock for its whole duration, hooks included, so a hook must never call
//! back into the machine that is running it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use turnstile::{Action, StateMachine};
//!
//! let machine = StateMachine::new();
//! machine.add_transition("idle", "PLAY", "playing");
//! machine.add_transition("playing", "STOP", "idle");
//!
//! let started = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&started);
//! machine.set_on_entry("playing", Action::new(move || flag.store(true, Ordering::SeqCst)));
//!
//! machine.set_state("idle")?;
//! machine.process("PLAY")?;
//!
//! assert!(started.load(Ordering::SeqCst));
//! assert_eq!(machine.valid_events("playing"), vec!["STOP"]);
//! # Ok::<(), turnstile::MachineError>(())
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use crate::core::{Action, DataBag, DataHandle, Event, Identifier, State, Value};
pub use machine::{Lifecycle, MachineError, Result, StateMachine, Transition};
