//! State and event identifiers.
//!
//! The engine treats states and events as opaque, totally ordered
//! identifiers. `State` and `Event` are the string-backed defaults; hosts
//! that prefer a closed vocabulary can use their own enums instead.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};

/// Trait for anything usable as a state or event identifier.
///
/// Identifiers need identity (`Ord`), cheap copies for query results
/// (`Clone`), and a printable form for errors and logs (`Display`).
/// The trait is implemented automatically for every type that qualifies.
///
/// # Example
///
/// ```rust
/// use std::fmt;
/// use turnstile::{Event, StateMachine};
///
/// #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl fmt::Display for Door {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         match self {
///             Door::Open => write!(f, "open"),
///             Door::Closed => write!(f, "closed"),
///         }
///     }
/// }
///
/// let machine: StateMachine<Door, Event> = StateMachine::default();
/// machine.add_transition(Door::Closed, "push", Door::Open);
/// assert_eq!(machine.states(), vec![Door::Open, Door::Closed]);
/// ```
pub trait Identifier: Clone + Ord + Debug + Display + Send + Sync {}

impl<T> Identifier for T where T: Clone + Ord + Debug + Display + Send + Sync {}

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// The identifier's text.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier, returning its text.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Debug::fmt(&self.0, f)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl From<&String> for $name {
            fn from(name: &String) -> Self {
                Self(name.clone())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_identifier! {
    /// String-backed state identifier.
    State
}

string_identifier! {
    /// String-backed event identifier.
    Event
}
