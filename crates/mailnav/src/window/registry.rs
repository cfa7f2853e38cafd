//! Window registry for tracking open windows.
//!
//! The `WindowRegistry` is pure storage: the ordered navigation stack of
//! registered windows plus the messages whose windows are still being
//! prepared. It holds no business rules; those live in
//! [`NavigationPolicy`](crate::policy::NavigationPolicy).

use std::collections::VecDeque;
use std::sync::Arc;

use super::handle::{MessageId, WindowHandle, WindowId};
use super::window_kind::WindowKind;
use super::window_object::WindowObject;
use crate::logging::targets;

/// Ordered storage of registered windows.
///
/// The front of the stack is the current top (most recently registered).
/// Lookups are linear; an application never has more than a handful of
/// windows open.
///
/// # Example
///
/// ```ignore
/// let mut registry = WindowRegistry::new();
/// registry.register(handle.clone());
/// assert_eq!(registry.top(), Some(&handle));
/// ```
#[derive(Debug, Default)]
pub struct WindowRegistry {
    /// Registered windows, front = top.
    stack: VecDeque<WindowHandle>,
    /// Messages whose windows are being prepared.
    pending: Vec<MessageId>,
}

impl WindowRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window on top of the stack.
    ///
    /// Registering a message window clears any pending entry for its message.
    pub fn register(&mut self, handle: WindowHandle) {
        if handle.kind().is_message() {
            if let Some(id) = handle.identifier() {
                self.pending.retain(|p| !p.matches(id));
            }
        }
        tracing::trace!(target: targets::REGISTRY, id = %handle.id(), kind = %handle.kind(), "window stored");
        self.stack.push_front(handle);
    }

    /// Remove a window from the registry, returning it if it was registered.
    pub fn unregister(&mut self, id: WindowId) -> Option<WindowHandle> {
        let pos = self.stack.iter().position(|h| h.id() == id)?;
        let handle = self.stack.remove(pos);
        if handle.is_some() {
            tracing::trace!(target: targets::REGISTRY, %id, "window removed");
        }
        handle
    }

    /// Find a message window of `kind` (or any message kind when `None`)
    /// bound to a matching identifier.
    pub fn find_by_identifier(&self, kind: Option<WindowKind>, id: &MessageId) -> Option<&WindowHandle> {
        self.stack.iter().find(|h| {
            kind.is_none_or(|k| h.kind() == k) && h.identifier().is_some_and(|own| own.matches(id))
        })
    }

    /// Find the handle wrapping `window`.
    pub fn find_by_window(&self, window: &Arc<dyn WindowObject>) -> Option<&WindowHandle> {
        self.stack.iter().find(|h| h.wraps(window))
    }

    /// Find the topmost window of `kind`.
    pub fn find_by_kind(&self, kind: WindowKind) -> Option<&WindowHandle> {
        self.stack.iter().find(|h| h.kind() == kind)
    }

    /// Get a window by ID.
    pub fn get(&self, id: WindowId) -> Option<&WindowHandle> {
        self.stack.iter().find(|h| h.id() == id)
    }

    /// Check if a window is registered.
    pub fn contains(&self, id: WindowId) -> bool {
        self.get(id).is_some()
    }

    /// The current top window.
    pub fn top(&self) -> Option<&WindowHandle> {
        self.stack.front()
    }

    /// The bottom-most window (the initial window once startup is done).
    pub fn bottom(&self) -> Option<&WindowHandle> {
        self.stack.back()
    }

    /// Get the number of registered windows.
    pub fn count(&self) -> usize {
        self.stack.len()
    }

    /// Check if there are no registered windows.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterate registered windows from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &WindowHandle> {
        self.stack.iter()
    }

    /// A read-only copy of the stack for policy evaluation.
    pub fn snapshot(&self) -> Vec<WindowHandle> {
        self.stack.iter().cloned().collect()
    }

    // =========================================================================
    // Pending messages
    // =========================================================================

    /// Record that a window for `id` is being prepared.
    ///
    /// Returns `false` if the message was already pending.
    pub fn register_pending_message(&mut self, id: MessageId) -> bool {
        if self.is_message_pending(&id) {
            return false;
        }
        self.pending.push(id);
        true
    }

    /// Forget a pending message. Returns `true` if it was pending.
    pub fn unregister_pending_message(&mut self, id: &MessageId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| !p.matches(id));
        self.pending.len() != before
    }

    /// Whether a window for `id` is being prepared.
    pub fn is_message_pending(&self, id: &MessageId) -> bool {
        self.pending.iter().any(|p| p.matches(id))
    }
}
