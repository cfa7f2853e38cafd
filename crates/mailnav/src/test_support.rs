//! Stub windows and dialogs for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use mailnav_core::IdleQueue;
use parking_lot::Mutex;

use crate::account::AccountId;
use crate::config::NavigationConfig;
use crate::manager::WindowManager;
use crate::modal::ModalDialog;
use crate::window::{CloseResponse, MessageId, WindowHandle, WindowId, WindowKind, WindowObject};

pub(crate) struct StubWindow {
    kind: WindowKind,
    identifier: Option<MessageId>,
    account: Option<AccountId>,
    close_response: CloseResponse,
    toolbar: Mutex<Option<bool>>,
    fullscreen: Mutex<Option<bool>>,
    raises: AtomicUsize,
    closes: AtomicUsize,
}

impl StubWindow {
    pub(crate) fn new(kind: WindowKind) -> Self {
        Self {
            kind,
            identifier: None,
            account: None,
            close_response: CloseResponse::Closed,
            toolbar: Mutex::new(None),
            fullscreen: Mutex::new(None),
            raises: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_uid(mut self, uid: &str) -> Self {
        self.identifier = Some(MessageId::uid(uid));
        self
    }

    pub(crate) fn with_message(mut self, identifier: MessageId) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub(crate) fn with_account(mut self, account: &str) -> Self {
        self.account = Some(AccountId::from(account));
        self
    }

    pub(crate) fn refusing(mut self) -> Self {
        self.close_response = CloseResponse::Cancelled;
        self
    }

    pub(crate) fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn shared(self) -> Arc<dyn WindowObject> {
        Arc::new(self)
    }

    pub(crate) fn as_dyn(self: &Arc<Self>) -> Arc<dyn WindowObject> {
        self.clone()
    }

    pub(crate) fn toolbar(&self) -> Option<bool> {
        *self.toolbar.lock()
    }

    pub(crate) fn fullscreen(&self) -> Option<bool> {
        *self.fullscreen.lock()
    }

    pub(crate) fn raise_count(&self) -> usize {
        self.raises.load(Ordering::SeqCst)
    }

    pub(crate) fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl WindowObject for StubWindow {
    fn kind(&self) -> WindowKind {
        self.kind
    }

    fn identifier(&self) -> Option<MessageId> {
        self.identifier.clone()
    }

    fn account(&self) -> Option<AccountId> {
        self.account.clone()
    }

    fn request_close(&self) -> CloseResponse {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.close_response
    }

    fn set_toolbar_visible(&self, visible: bool) {
        *self.toolbar.lock() = Some(visible);
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        *self.fullscreen.lock() = Some(fullscreen);
    }

    fn raise(&self) {
        self.raises.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) struct StubDialog {
    name: &'static str,
    log: Option<Arc<Mutex<Vec<&'static str>>>>,
    refuse: AtomicBool,
    modal: AtomicBool,
    presents: AtomicUsize,
}

impl StubDialog {
    pub(crate) fn new() -> Arc<Self> {
        Self::create("dialog", None)
    }

    /// A dialog that appends `name` to `log` on every close request.
    pub(crate) fn named(name: &'static str, log: Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
        Self::create(name, Some(log))
    }

    fn create(name: &'static str, log: Option<Arc<Mutex<Vec<&'static str>>>>) -> Arc<Self> {
        Arc::new(Self {
            name,
            log,
            refuse: AtomicBool::new(false),
            modal: AtomicBool::new(false),
            presents: AtomicUsize::new(0),
        })
    }

    pub(crate) fn refuse_close(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::SeqCst);
    }

    pub(crate) fn is_modal(&self) -> bool {
        self.modal.load(Ordering::SeqCst)
    }

    pub(crate) fn present_count(&self) -> usize {
        self.presents.load(Ordering::SeqCst)
    }
}

impl ModalDialog for StubDialog {
    fn request_close(&self) -> CloseResponse {
        if let Some(log) = &self.log {
            log.lock().push(self.name);
        }
        if self.refuse.load(Ordering::SeqCst) {
            CloseResponse::Cancelled
        } else {
            CloseResponse::Closed
        }
    }

    fn present(&self) {
        self.presents.fetch_add(1, Ordering::SeqCst);
    }

    fn set_modal(&self, modal: bool) {
        self.modal.store(modal, Ordering::SeqCst);
    }
}

/// A fresh window ID, backed by an unregistered handle.
pub(crate) fn window_id(window: &Arc<dyn WindowObject>) -> WindowId {
    WindowHandle::new(window.clone(), None).id()
}

/// A manager whose initial windows are stubs, driven by an idle queue.
pub(crate) fn manager(config: NavigationConfig) -> (Arc<IdleQueue>, WindowManager) {
    let queue = Arc::new(IdleQueue::new());
    let factory = |kind: WindowKind| -> Arc<dyn WindowObject> { StubWindow::new(kind).shared() };
    let manager = WindowManager::builder(queue.clone(), Arc::new(factory))
        .with_config(config)
        .build();
    (queue, manager)
}
