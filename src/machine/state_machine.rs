//! The thread-safe state machine.

use crate::core::{Action, DataHandle, Event, Identifier, State};
use crate::machine::descriptor::StateDescriptor;
use crate::machine::error::{MachineError, Result};
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};
use tracing::{debug, trace, warn};

/// Lifecycle of the machine object itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No state has been placed yet.
    Uninitialized,

    /// A current state is set. The machine never leaves this phase.
    Active,
}

/// One event-labelled edge of the transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub source: S,
    pub event: E,
    pub target: S,
}

struct Inner<S, E> {
    current: Option<S>,
    states: BTreeMap<S, StateDescriptor<S, E>>,
}

impl<S: Identifier, E: Identifier> Inner<S, E> {
    fn get_or_create(&mut self, state: S) -> &mut StateDescriptor<S, E> {
        self.states.entry(state).or_insert_with_key(|name| {
            trace!(state = %name, "registering state");
            StateDescriptor::new(name.clone())
        })
    }
}

/// A finite state machine driven by synchronous events.
///
/// The machine holds a registry of states, each with its outgoing
/// transitions, entry/exit hooks and a metadata bag, plus the current state.
/// All of it sits behind one lock: every call, including the hooks it runs,
/// is serialized.
///
/// Hooks run while that lock is held. A hook that calls back into the same
/// machine (`process`, `set_state`, or any query) deadlocks. Data handles are
/// the exception; they carry their own lock.
///
/// # Example
///
/// ```rust
/// use turnstile::StateMachine;
///
/// let machine = StateMachine::new();
/// machine.add_transition("idle", "PLAY", "playing");
/// machine.add_transition("playing", "STOP", "idle");
///
/// machine.set_state("idle").unwrap();
/// assert!(machine.process("PUSH").is_err());
///
/// machine.process("PLAY").unwrap();
/// assert_eq!(machine.state().unwrap(), "playing");
/// assert_eq!(machine.valid_events("playing"), vec!["STOP"]);
/// ```
pub struct StateMachine<S = State, E = Event> {
    inner: Mutex<Inner<S, E>>,
}

impl StateMachine {
    /// Create an empty machine keyed by string identifiers.
    ///
    /// Use [`StateMachine::default`] for custom identifier types.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Identifier, E: Identifier> Default for StateMachine<S, E> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                current: None,
                states: BTreeMap::new(),
            }),
        }
    }
}

impl<S: Identifier, E: Identifier> StateMachine<S, E> {
    /// Add or overwrite the transition `source --event--> target`.
    ///
    /// Both states are registered if they are not known yet.
    pub fn add_transition(&self, source: impl Into<S>, event: impl Into<E>, target: impl Into<S>) {
        let (source, event, target) = (source.into(), event.into(), target.into());
        let mut inner = self.inner.lock();

        inner.get_or_create(target.clone());
        let descriptor = inner.get_or_create(source);
        trace!(source = %descriptor.name, event = %event, target = %target, "adding transition");
        descriptor.transitions.insert(event, target);
    }

    /// Set the hook run when entering `state`.
    ///
    /// Passing `None` registers the state but keeps whatever hook it had.
    pub fn set_on_entry(&self, state: impl Into<S>, action: impl Into<Option<Action>>) {
        let mut inner = self.inner.lock();
        let descriptor = inner.get_or_create(state.into());
        if let Some(action) = action.into() {
            descriptor.on_entry = action;
        }
    }

    /// Set the hook run when leaving `state`.
    ///
    /// Passing `None` registers the state but keeps whatever hook it had.
    pub fn set_on_exit(&self, state: impl Into<S>, action: impl Into<Option<Action>>) {
        let mut inner = self.inner.lock();
        let descriptor = inner.get_or_create(state.into());
        if let Some(action) = action.into() {
            descriptor.on_exit = action;
        }
    }

    /// Place the machine in `state`, bypassing the transition table.
    ///
    /// Placing the machine in the state it is already in does nothing and
    /// runs no hooks. Otherwise the current state's exit hook runs, the
    /// state changes, and the new state's entry hook runs.
    ///
    /// # Errors
    ///
    /// [`MachineError::UnknownState`] if `state` was never registered. The
    /// current state is left untouched.
    pub fn set_state(&self, state: impl Into<S>) -> Result<()> {
        let target = state.into();
        let mut inner = self.inner.lock();

        if inner.current.as_ref() == Some(&target) {
            return Ok(());
        }

        let Some(on_entry) = inner.states.get(&target).map(|d| d.on_entry.clone()) else {
            return Err(MachineError::UnknownState {
                state: target.to_string(),
            });
        };
        let on_exit = inner
            .current
            .as_ref()
            .and_then(|current| inner.states.get(current))
            .map(|d| d.on_exit.clone());

        debug!(from = ?inner.current, to = %target, "placing state");
        if let Some(on_exit) = on_exit {
            on_exit.run();
        }
        inner.current = Some(target);
        on_entry.run();
        Ok(())
    }

    /// Fire `event` from the current state.
    ///
    /// On success the current state's exit hook runs, the machine moves to
    /// the transition's target, and the target's entry hook runs. Self-loops
    /// declared in the table run both hooks.
    ///
    /// # Errors
    ///
    /// - [`MachineError::NoCurrentState`] before any state was placed
    /// - [`MachineError::NoTransitions`] if the current state has no outgoing edges
    /// - [`MachineError::EventNotAccepted`] if none of them is labelled `event`
    /// - [`MachineError::UnknownState`] if the registry is inconsistent
    ///
    /// The current state is left untouched on every error.
    pub fn process<Q>(&self, event: &Q) -> Result<()>
    where
        E: Borrow<Q>,
        Q: Ord + Display + ?Sized,
    {
        let mut inner = self.inner.lock();

        let current = inner.current.clone().ok_or(MachineError::NoCurrentState)?;
        let Some(descriptor) = inner.states.get(&current) else {
            warn!(state = %current, "current state has no descriptor");
            return Err(MachineError::UnknownState {
                state: current.to_string(),
            });
        };
        if !descriptor.has_transitions() {
            return Err(MachineError::NoTransitions {
                state: descriptor.name.to_string(),
            });
        }
        let Some(target) = descriptor.target(event).cloned() else {
            return Err(MachineError::EventNotAccepted {
                state: descriptor.name.to_string(),
                event: event.to_string(),
            });
        };
        let on_exit = descriptor.on_exit.clone();

        let Some(on_entry) = inner.states.get(&target).map(|d| d.on_entry.clone()) else {
            warn!(state = %target, "transition target has no descriptor");
            return Err(MachineError::UnknownState {
                state: target.to_string(),
            });
        };

        debug!(from = %current, to = %target, event = %event, "transition");
        on_exit.run();
        inner.current = Some(target);
        on_entry.run();
        Ok(())
    }

    /// The current state, or `None` if none was placed yet.
    pub fn state(&self) -> Option<S> {
        self.inner.lock().current.clone()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.inner.lock().current {
            Some(_) => Lifecycle::Active,
            None => Lifecycle::Uninitialized,
        }
    }

    /// Every state that is the source or the target of some transition, in
    /// ascending order.
    ///
    /// States known only through a hook or a data access are not listed.
    pub fn states(&self) -> Vec<S> {
        let inner = self.inner.lock();
        let mut states = BTreeSet::new();
        for (name, descriptor) in &inner.states {
            if descriptor.has_transitions() {
                states.insert(name.clone());
            }
            states.extend(descriptor.transitions.values().cloned());
        }
        states.into_iter().collect()
    }

    /// States directly reachable from `source`, ascending and deduplicated.
    pub fn out_states<Q>(&self, source: &Q) -> Vec<S>
    where
        S: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let inner = self.inner.lock();
        let Some(descriptor) = inner.states.get(source) else {
            return Vec::new();
        };
        descriptor
            .transitions
            .values()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Events accepted by `state`, in ascending order.
    pub fn valid_events<Q>(&self, state: &Q) -> Vec<E>
    where
        S: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let inner = self.inner.lock();
        inner
            .states
            .get(state)
            .map(|d| d.transitions.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `state` has a transition labelled `event`.
    pub fn is_valid_event<Q, R>(&self, state: &Q, event: &R) -> bool
    where
        S: Borrow<Q>,
        Q: Ord + ?Sized,
        E: Borrow<R>,
        R: Ord + ?Sized,
    {
        let inner = self.inner.lock();
        inner
            .states
            .get(state)
            .is_some_and(|d| d.target(event).is_some())
    }

    /// Whether `state` is registered, by any means.
    pub fn has_state<Q>(&self, state: &Q) -> bool
    where
        S: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.lock().states.contains_key(state)
    }

    /// The whole transition table, ordered by source then event.
    pub fn transitions(&self) -> Vec<Transition<S, E>> {
        let inner = self.inner.lock();
        inner
            .states
            .iter()
            .flat_map(|(source, descriptor)| {
                descriptor
                    .transitions
                    .iter()
                    .map(move |(event, target)| Transition {
                        source: source.clone(),
                        event: event.clone(),
                        target: target.clone(),
                    })
            })
            .collect()
    }

    /// The metadata bag of `state`, registering the state if needed.
    ///
    /// The returned handle stays valid after the call and shares the bag
    /// with every other handle for the same state.
    pub fn data(&self, state: impl Into<S>) -> DataHandle {
        let mut inner = self.inner.lock();
        inner.get_or_create(state.into()).data.clone()
    }
}

impl<S: Identifier, E: Identifier> fmt::Debug for StateMachine<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("StateMachine")
            .field("current", &inner.current)
            .field("states", &inner.states.len())
            .finish()
    }
}
