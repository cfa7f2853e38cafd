//! Window identity and storage.
//!
//! This module provides the data model the navigation manager works on:
//!
//! - [`WindowKind`]: the six window archetypes and their precedence
//! - [`WindowObject`]: the capability every concrete window implements
//! - [`WindowHandle`]: a window committed to the registry
//! - [`MessageId`]: the message a viewer or editor is bound to
//! - [`WindowRegistry`]: the ordered stack of registered windows
//!
//! # Implementing a window
//!
//! ```
//! use mailnav::window::{CloseResponse, MessageId, WindowKind, WindowObject};
//!
//! struct Viewer {
//!     uid: String,
//! }
//!
//! impl WindowObject for Viewer {
//!     fn kind(&self) -> WindowKind {
//!         WindowKind::MessageView
//!     }
//!
//!     fn identifier(&self) -> Option<MessageId> {
//!         Some(MessageId::uid(self.uid.clone()))
//!     }
//!
//!     fn request_close(&self) -> CloseResponse {
//!         CloseResponse::Closed
//!     }
//!
//!     fn set_toolbar_visible(&self, _visible: bool) {}
//!     fn set_fullscreen(&self, _fullscreen: bool) {}
//!     fn raise(&self) {}
//! }
//! ```

mod handle;
mod registry;
mod window_kind;
mod window_object;

pub use handle::{HeaderRef, MessageId, WindowHandle, WindowId};
pub use registry::WindowRegistry;
pub use window_kind::WindowKind;
pub use window_object::{same_window, CloseResponse, WindowObject};
