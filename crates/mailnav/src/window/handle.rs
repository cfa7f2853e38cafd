//! Registered window handles and message identifiers.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use mailnav_core::{ConnectionId, Signal};
use parking_lot::Mutex;

use super::window_kind::WindowKind;
use super::window_object::{same_window, WindowObject};

/// A unique identifier for a registered window.
///
/// IDs are never reused within a process, so an ID held after its window was
/// unregistered can never match a later window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    /// Get the raw u64 value of this window ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

fn next_window_id() -> WindowId {
    WindowId(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
}

/// A reference to a header object, compared by identity.
///
/// Embedded messages (attachments that are themselves messages) have no uid
/// of their own; their viewers are identified by the header object instead.
#[derive(Clone)]
pub struct HeaderRef(Arc<dyn Any + Send + Sync>);

impl HeaderRef {
    /// Wrap a shared header object.
    pub fn new<T: Any + Send + Sync>(header: Arc<T>) -> Self {
        Self(header)
    }

    /// Whether both references point at the same header object.
    pub fn same_header(&self, other: &HeaderRef) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl PartialEq for HeaderRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_header(other)
    }
}

impl Eq for HeaderRef {}

impl fmt::Debug for HeaderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeaderRef({:p})", Arc::as_ptr(&self.0))
    }
}

/// Identifies the message a viewer or editor window is bound to.
///
/// # Matching
///
/// Two identifiers match when both carry a uid and the uids are equal.
/// Otherwise they match when both carry a header reference to the same
/// object. An identifier with neither never matches anything.
///
/// ```
/// use mailnav::window::MessageId;
///
/// assert!(MessageId::uid("m1").matches(&MessageId::uid("m1")));
/// assert!(!MessageId::uid("m1").matches(&MessageId::uid("m2")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageId {
    uid: Option<String>,
    header: Option<HeaderRef>,
}

impl MessageId {
    /// An identifier with an explicit message uid.
    pub fn uid(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            header: None,
        }
    }

    /// An identifier for a uid-less message, keyed by its header object.
    pub fn header(header: HeaderRef) -> Self {
        Self {
            uid: None,
            header: Some(header),
        }
    }

    /// Attach a header reference to this identifier.
    pub fn with_header(mut self, header: HeaderRef) -> Self {
        self.header = Some(header);
        self
    }

    /// The message uid, if known.
    pub fn uid_str(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// The header reference, if any.
    pub fn header_ref(&self) -> Option<&HeaderRef> {
        self.header.as_ref()
    }

    /// Whether both identifiers refer to the same message.
    pub fn matches(&self, other: &MessageId) -> bool {
        match (&self.uid, &other.uid) {
            (Some(a), Some(b)) => a == b,
            _ => match (&self.header, &other.header) {
                (Some(a), Some(b)) => a.same_header(b),
                _ => false,
            },
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.uid, &self.header) {
            (Some(uid), _) => f.write_str(uid),
            (None, Some(header)) => write!(f, "{header:?}"),
            (None, None) => f.write_str("<none>"),
        }
    }
}

struct HandleInner {
    id: WindowId,
    kind: WindowKind,
    identifier: Option<MessageId>,
    parent: Option<Weak<HandleInner>>,
    /// Set while a modal dialog is transient to this window.
    modal: AtomicBool,
    window: Arc<dyn WindowObject>,
    /// Emitted by the window when the user closes it from its own chrome.
    close_requested: Signal<()>,
    close_observer: Mutex<Option<ConnectionId>>,
}

/// A window committed to the registry.
///
/// Cloning a handle is cheap; clones share identity. The parent link is weak,
/// so a handle never keeps the window that opened it alive.
#[derive(Clone)]
pub struct WindowHandle {
    inner: Arc<HandleInner>,
}

impl WindowHandle {
    /// Create a handle for `window`, snapshotting its kind and identifier.
    pub(crate) fn new(window: Arc<dyn WindowObject>, parent: Option<&WindowHandle>) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id: next_window_id(),
                kind: window.kind(),
                identifier: window.identifier(),
                parent: parent.map(|p| Arc::downgrade(&p.inner)),
                modal: AtomicBool::new(false),
                window,
                close_requested: Signal::new(),
                close_observer: Mutex::new(None),
            }),
        }
    }

    /// The registry identity of this window.
    pub fn id(&self) -> WindowId {
        self.inner.id
    }

    /// The window's kind.
    pub fn kind(&self) -> WindowKind {
        self.inner.kind
    }

    /// The message this window is bound to, if any.
    pub fn identifier(&self) -> Option<&MessageId> {
        self.inner.identifier.as_ref()
    }

    /// The window that caused this one to open, if it still exists.
    pub fn parent(&self) -> Option<WindowHandle> {
        self.inner
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| WindowHandle { inner })
    }

    /// Whether a modal dialog is currently transient to this window.
    pub fn is_modal(&self) -> bool {
        self.inner.modal.load(Ordering::SeqCst)
    }

    pub(crate) fn set_modal(&self, modal: bool) {
        self.inner.modal.store(modal, Ordering::SeqCst);
    }

    /// The underlying window object.
    pub fn window(&self) -> &Arc<dyn WindowObject> {
        &self.inner.window
    }

    /// Whether this handle wraps `window`.
    pub fn wraps(&self, window: &Arc<dyn WindowObject>) -> bool {
        same_window(&self.inner.window, window)
    }

    /// Whether this window is a nested message opened from `other`.
    pub fn is_nested_message_of(&self, other: &WindowHandle) -> bool {
        self.kind() == WindowKind::MessageView
            && other.kind() == WindowKind::MessageView
            && self.parent().is_some_and(|p| p == *other)
    }

    /// Signal the window emits when the user closes it from its own chrome.
    ///
    /// While the window is registered, the manager observes this signal.
    pub fn close_requested(&self) -> &Signal<()> {
        &self.inner.close_requested
    }

    pub(crate) fn attach_close_observer(&self, id: ConnectionId) {
        if let Some(old) = self.inner.close_observer.lock().replace(id) {
            self.inner.close_requested.disconnect(old);
        }
    }

    pub(crate) fn detach_close_observer(&self) {
        if let Some(id) = self.inner.close_observer.lock().take() {
            self.inner.close_requested.disconnect(id);
        }
    }
}

impl PartialEq for WindowHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for WindowHandle {}

impl fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowHandle")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.kind)
            .field("identifier", &self.inner.identifier)
            .field("modal", &self.is_modal())
            .finish()
    }
}
