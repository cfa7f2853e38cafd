//! Error types for the window manager.
//!
//! Navigation outcomes (rejections, refused closes) are ordinary values and
//! never errors. `NavError` only reports calls that break the manager's
//! structural assumptions; the manager logs them and leaves its state as it
//! was.

use crate::window::WindowKind;

/// Result type alias for window manager operations.
pub type Result<T> = std::result::Result<T, NavError>;

/// Structural misuse of the window manager.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// The window is not registered.
    #[error("{kind} window is not registered")]
    NotRegistered { kind: WindowKind },

    /// The modal dialog is not on the modal stack.
    #[error("modal dialog is not on the modal stack")]
    UnknownModal,

    /// A modal dialog was attached to an owner that is not registered.
    #[error("modal owner ({kind} window) is not registered")]
    UnknownModalOwner { kind: WindowKind },
}

impl NavError {
    /// Create a not-registered error.
    pub fn not_registered(kind: WindowKind) -> Self {
        Self::NotRegistered { kind }
    }
}
