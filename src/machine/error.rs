//! Errors returned by state placement and event processing.

use thiserror::Error;

/// Errors that can occur when moving the machine between states.
///
/// Identifiers are captured in their display form so the error type does
/// not depend on the machine's identifier types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("state '{state}' does not exist")]
    UnknownState { state: String },

    #[error("no current state is set")]
    NoCurrentState,

    #[error("state '{state}' does not have transitions")]
    NoTransitions { state: String },

    #[error("state '{state}' does not accept event '{event}'")]
    EventNotAccepted { state: String, event: String },
}

/// Result alias for machine operations.
pub type Result<T, E = MachineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_identifiers() {
        let err = MachineError::EventNotAccepted {
            state: "idle".to_string(),
            event: "PUSH".to_string(),
        };
        assert_eq!(err.to_string(), "state 'idle' does not accept event 'PUSH'");

        let err = MachineError::UnknownState {
            state: "foo".to_string(),
        };
        assert_eq!(err.to_string(), "state 'foo' does not exist");
        assert_eq!(MachineError::NoCurrentState.to_string(), "no current state is set");
    }
}
