//! Internal record of one state.

use crate::core::{Action, DataHandle, Identifier};
use std::collections::BTreeMap;

/// Transitions, hooks and metadata for a single state.
///
/// Descriptors are created lazily the first time a state is referenced and
/// are never removed.
#[derive(Debug)]
pub(crate) struct StateDescriptor<S, E> {
    pub(crate) name: S,
    pub(crate) transitions: BTreeMap<E, S>,
    pub(crate) on_entry: Action,
    pub(crate) on_exit: Action,
    pub(crate) data: DataHandle,
}

impl<S: Identifier, E: Identifier> StateDescriptor<S, E> {
    pub(crate) fn new(name: S) -> Self {
        Self {
            name,
            transitions: BTreeMap::new(),
            on_entry: Action::noop(),
            on_exit: Action::noop(),
            data: DataHandle::new(),
        }
    }

    /// Look up the target for `event`.
    pub(crate) fn target<Q>(&self, event: &Q) -> Option<&S>
    where
        E: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.transitions.get(event)
    }

    pub(crate) fn has_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }
}
