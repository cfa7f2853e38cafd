//! Logging conventions for mailnav.
//!
//! mailnav uses the `tracing` crate for instrumentation. To see logs, install a
//! tracing subscriber in the application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("mailnav=debug")
//!     .init();
//! ```
//!
//! Every event is emitted with one of the [`targets`] below so a subscriber
//! can filter a single subsystem, e.g. `mailnav::policy=trace`.

/// Span names used throughout mailnav for tracing.
pub mod span_names {
    /// A window registration attempt.
    pub const REGISTER: &str = "mailnav::register";
    /// A window unregistration.
    pub const UNREGISTER: &str = "mailnav::unregister";
    /// A close chain (close all, close all but initial).
    pub const CLOSE_CHAIN: &str = "mailnav::close_chain";
}

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "mailnav_core::signal";
    /// Deferred task queue target.
    pub const TASK: &str = "mailnav_core::task";
    /// Window registry storage.
    pub const REGISTRY: &str = "mailnav::registry";
    /// Navigation policy decisions.
    pub const POLICY: &str = "mailnav::policy";
    /// Modal dialog stack.
    pub const MODAL: &str = "mailnav::modal";
    /// Window lifecycle coordination.
    pub const LIFECYCLE: &str = "mailnav::lifecycle";
    /// Account removal handling.
    pub const ACCOUNT: &str = "mailnav::account";
    /// Configuration loading.
    pub const CONFIG: &str = "mailnav::config";
}
