//! Mailnav - window navigation and lifecycle management for a mobile mail client.
//!
//! A mail client moves between a handful of window kinds: the account list,
//! mailbox and folder lists, header lists, message viewers and message
//! editors. This crate decides which of them may be open at once, closes
//! the ones a new window replaces, keeps modal dialogs in order, and tears
//! windows down when their account disappears. It never draws anything;
//! concrete windows come from the host toolkit through [`WindowObject`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mailnav::prelude::*;
//!
//! # fn accounts_window() -> Arc<dyn WindowObject> { unimplemented!() }
//! # fn create(kind: WindowKind) -> Arc<dyn WindowObject> { unimplemented!() }
//! let queue = Arc::new(IdleQueue::new());
//! let factory = |kind: WindowKind| -> Arc<dyn WindowObject> { create(kind) };
//! let manager = WindowManager::builder(queue.clone(), Arc::new(factory))
//!     .with_config(NavigationConfig::new())
//!     .build();
//!
//! let registration = manager.register_window(accounts_window(), None);
//! assert!(registration.is_registered());
//!
//! // Deferred work (modal re-presentation, account cleanup) runs here.
//! queue.run_pending();
//! ```

pub mod account;
pub mod config;
mod error;
pub mod manager;
pub mod modal;
pub mod operations;
pub mod policy;
pub mod prelude;
pub mod window;

#[cfg(test)]
mod test_support;

pub use mailnav_core::logging;
pub use mailnav_core::{ConnectionGuard, ConnectionId, IdleQueue, Scheduler, Signal};

pub use account::{AccountId, AccountStore, AccountWatcher};
pub use config::{ChromeStyle, ConfigError, DisplayStyle, NavigationConfig, ToolbarSettings};
pub use error::{NavError, Result};
pub use manager::{LifecycleEvent, Registration, WeakWindowManager, WindowManager, WindowManagerBuilder};
pub use modal::{ModalDialog, ModalStack};
pub use operations::{InitialWindowFactory, MailOperationQueue};
pub use policy::{NavigationPolicy, NavigationRequest, Outcome};
pub use window::{CloseResponse, HeaderRef, MessageId, WindowHandle, WindowId, WindowKind, WindowObject};
