//! Modal dialog management.
//!
//! This module provides [`ModalStack`], which tracks the modal dialogs that
//! are transient to registered windows. A window with an open modal dialog
//! cannot be closed or replaced until the dialogs are gone, and dialogs close
//! in LIFO order.
//!
//! # Usage
//!
//! ```ignore
//! use mailnav::modal::ModalStack;
//!
//! let modals = ModalStack::new(scheduler);
//! modals.push_modal(dialog.clone(), owner_id);
//! assert!(modals.has_modal_for(owner_id));
//!
//! // When the dialog is dismissed
//! modals.pop_modal(&dialog);
//! ```

use std::sync::{Arc, Weak};

use mailnav_core::Scheduler;
use parking_lot::Mutex;

use crate::logging::targets;
use crate::window::{CloseResponse, WindowId};

/// A modal dialog as seen by the window manager.
pub trait ModalDialog: Send + Sync {
    /// Ask the dialog to close. The dialog may refuse.
    fn request_close(&self) -> CloseResponse;

    /// Bring the dialog to the front.
    fn present(&self);

    /// Mark the dialog modal (or not) in the toolkit.
    fn set_modal(&self, modal: bool);
}

/// Whether two dialog objects are the same object.
pub fn same_dialog(a: &Arc<dyn ModalDialog>, b: &Arc<dyn ModalDialog>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Information about an active modal dialog.
#[derive(Clone)]
struct ModalEntry {
    /// The modal dialog.
    dialog: Arc<dyn ModalDialog>,
    /// The window the dialog is transient to.
    owner: WindowId,
}

type Entries = Arc<Mutex<Vec<ModalEntry>>>;

/// Tracks modal dialogs and the windows they block.
///
/// The most recently pushed dialog is the active one. No lock is held while
/// a dialog is called, so dialogs may pop themselves from inside
/// [`ModalDialog::request_close`].
pub struct ModalStack {
    entries: Entries,
    scheduler: Arc<dyn Scheduler>,
}

impl ModalStack {
    /// Create an empty modal stack that re-presents dialogs through `scheduler`.
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            scheduler,
        }
    }

    /// Push a modal dialog transient to `owner`.
    ///
    /// Returns `false` if the dialog was already on the stack.
    pub fn push_modal(&self, dialog: Arc<dyn ModalDialog>, owner: WindowId) -> bool {
        {
            let mut entries = self.entries.lock();
            if entries.iter().any(|e| same_dialog(&e.dialog, &dialog)) {
                return false;
            }
            entries.push(ModalEntry {
                dialog: dialog.clone(),
                owner,
            });
        }
        tracing::debug!(target: targets::MODAL, %owner, "modal dialog pushed");
        dialog.set_modal(true);
        true
    }

    /// Remove a dismissed dialog from the stack.
    ///
    /// If dialogs remain, the new active dialog is re-presented and marked
    /// modal again on the next loop turn. Returns the owner the dialog was
    /// transient to, or `None` if it was not on the stack.
    pub fn pop_modal(&self, dialog: &Arc<dyn ModalDialog>) -> Option<WindowId> {
        let owner = self.remove(dialog)?;
        tracing::debug!(target: targets::MODAL, %owner, "modal dialog popped");

        if self.entries.lock().is_empty() {
            return Some(owner);
        }

        let entries: Weak<Mutex<Vec<ModalEntry>>> = Arc::downgrade(&self.entries);
        self.scheduler.schedule_deferred(Box::new(move || {
            let Some(entries) = entries.upgrade() else {
                return;
            };
            let next = entries.lock().last().map(|e| e.dialog.clone());
            if let Some(next) = next {
                tracing::trace!(target: targets::MODAL, "re-presenting active modal");
                next.present();
                next.set_modal(true);
            }
        }));
        Some(owner)
    }

    /// Whether any dialog is transient to `owner`.
    pub fn has_modal_for(&self, owner: WindowId) -> bool {
        self.entries.lock().iter().any(|e| e.owner == owner)
    }

    /// The active (topmost) modal dialog.
    pub fn active_modal(&self) -> Option<Arc<dyn ModalDialog>> {
        self.entries.lock().last().map(|e| e.dialog.clone())
    }

    /// Whether any modal dialog is open.
    pub fn has_modal(&self) -> bool {
        !self.entries.lock().is_empty()
    }

    /// Get the number of open modal dialogs.
    pub fn modal_count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Close every dialog transient to `owner`, most recent first.
    ///
    /// Stops at the first dialog that refuses, leaving it and every older
    /// dialog untouched. Returns `true` if no dialog for `owner` remains.
    pub fn close_active_modals(&self, owner: WindowId) -> bool {
        loop {
            let next = self
                .entries
                .lock()
                .iter()
                .rev()
                .find(|e| e.owner == owner)
                .map(|e| e.dialog.clone());
            let Some(dialog) = next else {
                return true;
            };

            if dialog.request_close().is_refused() {
                tracing::info!(target: targets::MODAL, %owner, "modal dialog refused to close");
                return false;
            }
            // The dialog may already have popped itself.
            self.remove(&dialog);
        }
    }

    /// Drop every entry transient to `owner` without closing the dialogs.
    ///
    /// Returns the number of entries removed.
    pub fn clear_owner(&self, owner: WindowId) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|e| e.owner != owner);
        before - entries.len()
    }

    fn remove(&self, dialog: &Arc<dyn ModalDialog>) -> Option<WindowId> {
        let mut entries = self.entries.lock();
        let pos = entries.iter().position(|e| same_dialog(&e.dialog, dialog))?;
        Some(entries.remove(pos).owner)
    }
}
