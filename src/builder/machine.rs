//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Action, Event, Identifier, State, Value};
use crate::machine::StateMachine;

enum Declaration<S, E> {
    Transition { source: S, event: E, target: S },
    OnEntry(S, Action),
    OnExit(S, Action),
    Data(S, String, Value),
}

/// Builder for wiring a state machine with a fluent API.
///
/// Declarations are applied in the order they were made. If an initial
/// state is given, it is placed last, so its entry hook runs during
/// `build()`.
///
/// # Example
///
/// ```rust
/// use turnstile::StateMachineBuilder;
///
/// let machine = StateMachineBuilder::new()
///     .transition("idle", "PLAY", "playing")
///     .transition("playing", "STOP", "idle")
///     .data("playing", "label", "Now playing")
///     .initial("idle")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.state().unwrap(), "idle");
/// assert_eq!(machine.data("playing").string("label"), "Now playing");
/// ```
pub struct StateMachineBuilder<S = State, E = Event> {
    declarations: Vec<Declaration<S, E>>,
    initial: Option<S>,
}

impl StateMachineBuilder {
    /// Create a builder for a machine keyed by string identifiers.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Identifier, E: Identifier> Default for StateMachineBuilder<S, E> {
    fn default() -> Self {
        Self {
            declarations: Vec::new(),
            initial: None,
        }
    }
}

impl<S: Identifier, E: Identifier> StateMachineBuilder<S, E> {
    /// Declare the transition `source --event--> target`.
    pub fn transition(
        mut self,
        source: impl Into<S>,
        event: impl Into<E>,
        target: impl Into<S>,
    ) -> Self {
        self.declarations.push(Declaration::Transition {
            source: source.into(),
            event: event.into(),
            target: target.into(),
        });
        self
    }

    /// Run `hook` whenever the machine enters `state`.
    pub fn on_entry<F>(mut self, state: impl Into<S>, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.declarations
            .push(Declaration::OnEntry(state.into(), Action::new(hook)));
        self
    }

    /// Run `hook` whenever the machine leaves `state`.
    pub fn on_exit<F>(mut self, state: impl Into<S>, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.declarations
            .push(Declaration::OnExit(state.into(), Action::new(hook)));
        self
    }

    /// Seed an entry in the data bag of `state`.
    pub fn data(
        mut self,
        state: impl Into<S>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.declarations
            .push(Declaration::Data(state.into(), key.into(), value.into()));
        self
    }

    /// Set the state the machine starts in (optional).
    pub fn initial(mut self, state: impl Into<S>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Build the state machine.
    ///
    /// Without an initial state the machine starts uninitialized.
    pub fn build(self) -> Result<StateMachine<S, E>, BuildError> {
        let machine = StateMachine::default();

        for declaration in self.declarations {
            match declaration {
                Declaration::Transition {
                    source,
                    event,
                    target,
                } => machine.add_transition(source, event, target),
                Declaration::OnEntry(state, action) => machine.set_on_entry(state, action),
                Declaration::OnExit(state, action) => machine.set_on_exit(state, action),
                Declaration::Data(state, key, value) => {
                    machine.data(state).insert(key, value);
                }
            }
        }

        if let Some(initial) = self.initial {
            if !machine.has_state(&initial) {
                return Err(BuildError::UnknownInitialState {
                    state: initial.to_string(),
                });
            }
            machine.set_state(initial)?;
        }

        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Lifecycle;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn builder_without_initial_is_uninitialized() {
        let machine = StateMachineBuilder::new()
            .transition("a", "go", "b")
            .build()
            .unwrap();

        assert_eq!(machine.lifecycle(), Lifecycle::Uninitialized);
        assert_eq!(machine.states(), vec!["a", "b"]);
    }

    #[test]
    fn builder_rejects_undeclared_initial_state() {
        let result = StateMachineBuilder::new()
            .transition("a", "go", "b")
            .initial("c")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::UnknownInitialState { ref state }) if state == "c"
        ));
    }

    #[test]
    fn initial_state_runs_entry_hook() {
        let entered = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&entered);

        let machine = StateMachineBuilder::new()
            .transition("a", "go", "b")
            .on_entry("a", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .initial("a")
            .build()
            .unwrap();

        assert_eq!(machine.state().unwrap(), "a");
        assert_eq!(entered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn hook_only_state_can_be_initial() {
        let machine = StateMachineBuilder::new()
            .on_exit("boot", || {})
            .initial("boot")
            .build()
            .unwrap();

        assert_eq!(machine.state().unwrap(), "boot");
        assert!(machine.states().is_empty());
    }

    #[test]
    fn data_declarations_seed_bags() {
        let machine = StateMachineBuilder::new()
            .data("a", "retries", 3)
            .data("a", "verbose", true)
            .build()
            .unwrap();

        assert_eq!(machine.data("a").int("retries"), 3);
        assert!(machine.data("a").bool("verbose"));
    }
}
