//! Prelude module for mailnav.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use mailnav::prelude::*;
//! ```
//!
//! This provides access to:
//! - The window manager (`WindowManager`, `Registration`, `LifecycleEvent`)
//! - Window capabilities (`WindowObject`, `ModalDialog`, `WindowKind`)
//! - Configuration (`NavigationConfig`, `ChromeStyle`, `DisplayStyle`)

// ============================================================================
// Window Manager
// ============================================================================

pub use crate::manager::{LifecycleEvent, Registration, WindowManager};
pub use crate::policy::Outcome;

// ============================================================================
// Windows and Dialogs
// ============================================================================

pub use crate::modal::ModalDialog;
pub use crate::window::{CloseResponse, MessageId, WindowHandle, WindowKind, WindowObject};

// ============================================================================
// Accounts and Operations
// ============================================================================

pub use crate::account::{AccountId, AccountStore, AccountWatcher};
pub use crate::operations::{InitialWindowFactory, MailOperationQueue};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::{ChromeStyle, DisplayStyle, NavigationConfig};

// ============================================================================
// Deferred Execution
// ============================================================================

pub use mailnav_core::{IdleQueue, Scheduler, Signal};
