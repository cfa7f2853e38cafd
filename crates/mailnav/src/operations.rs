//! Collaborators the window manager drives but does not own.

use std::sync::Arc;

use crate::window::{WindowId, WindowKind, WindowObject};

/// The queue of in-flight mail operations (fetch, send, refresh).
pub trait MailOperationQueue: Send + Sync {
    /// Cancel every operation started from `source`.
    ///
    /// Best effort: operations past the point of cancellation complete and
    /// their results are dropped by the caller.
    fn cancel_by_source(&self, source: WindowId);
}

/// Creates the window shown first at startup.
///
/// The manager calls this when a message window is opened while no window
/// is registered, for example from a notification.
pub trait InitialWindowFactory: Send + Sync {
    /// Create, but do not register, a window of `kind`.
    fn create_initial_window(&self, kind: WindowKind) -> Arc<dyn WindowObject>;
}

impl<F> InitialWindowFactory for F
where
    F: Fn(WindowKind) -> Arc<dyn WindowObject> + Send + Sync,
{
    fn create_initial_window(&self, kind: WindowKind) -> Arc<dyn WindowObject> {
        self(kind)
    }
}
