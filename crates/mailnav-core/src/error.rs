//! Error types for mailnav-core.

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the host event-loop primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The task ID is unknown, or the task already ran or was cancelled.
    #[error("Invalid or expired task ID {0}")]
    UnknownTask(u64),
}
