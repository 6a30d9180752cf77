//! Entry and exit hooks.
//!
//! Hooks are caller-supplied callbacks run when the machine enters or
//! leaves a state. They run synchronously, while the machine lock is held.

use std::fmt;
use std::sync::Arc;

/// A callback attached to a state's entry or exit.
///
/// Actions are reference counted, so cloning one is cheap and every clone
/// runs the same closure.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use turnstile::Action;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let action = Action::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// action.run();
/// action.clone().run();
/// assert_eq!(calls.load(Ordering::SeqCst), 2);
/// ```
#[derive(Clone)]
pub struct Action {
    callback: Arc<dyn Fn() + Send + Sync>,
}

impl Action {
    /// Wrap a closure as an action.
    ///
    /// The closure must be thread-safe (`Send + Sync`) because the machine
    /// may be driven from any thread.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// The action every fresh state starts with. Does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Invoke the callback.
    pub fn run(&self) {
        (self.callback)()
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}
