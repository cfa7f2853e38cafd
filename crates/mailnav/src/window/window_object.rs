//! The capability every concrete window implements.

use std::sync::Arc;

use super::handle::MessageId;
use super::window_kind::WindowKind;
use crate::account::AccountId;

/// How a window answered a close request.
///
/// Windows with unsaved edits may prompt the user first; the prompt has three
/// outcomes. Only [`CloseResponse::Cancelled`] refuses the close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseResponse {
    /// The window closed with nothing to save.
    Closed,
    /// The user chose to save the draft, then the window closed.
    DraftSaved,
    /// The user chose to discard the draft, then the window closed.
    DraftDiscarded,
    /// The user cancelled; the window stays open.
    Cancelled,
}

impl CloseResponse {
    /// Whether the window refused to close.
    pub fn is_refused(self) -> bool {
        matches!(self, CloseResponse::Cancelled)
    }
}

/// A toolkit window as seen by the window manager.
///
/// Implementations must tolerate being called back from inside the manager,
/// and may call back into the manager themselves (for example unregistering
/// from inside [`request_close`](Self::request_close)).
pub trait WindowObject: Send + Sync {
    /// The archetype of this window. Must not change over the window's life.
    fn kind(&self) -> WindowKind;

    /// The message shown or edited by this window, if any.
    fn identifier(&self) -> Option<MessageId> {
        None
    }

    /// The account owning the data this window shows, if any.
    fn account(&self) -> Option<AccountId> {
        None
    }

    /// Ask the window to close. The window may refuse.
    fn request_close(&self) -> CloseResponse;

    /// Show or hide the window's toolbar.
    fn set_toolbar_visible(&self, visible: bool);

    /// Switch the window in or out of fullscreen.
    fn set_fullscreen(&self, fullscreen: bool);

    /// Bring the window to the front.
    fn raise(&self);
}

/// Whether two window objects are the same object.
pub fn same_window(a: &Arc<dyn WindowObject>, b: &Arc<dyn WindowObject>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
