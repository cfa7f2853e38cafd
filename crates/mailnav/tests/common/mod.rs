//! Shared mocks for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use mailnav::{
    AccountId, AccountStore, CloseResponse, IdleQueue, LifecycleEvent, MailOperationQueue, MessageId,
    ModalDialog, NavigationConfig, Signal, WeakWindowManager, WindowId, WindowKind, WindowManager, WindowObject,
};
use parking_lot::Mutex;

/// Route `tracing` output to the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Ordered record of what windows were asked to do.
#[derive(Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn push(&self, entry: String) {
        self.0.lock().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn closes(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| e.strip_prefix("close:").map(str::to_owned))
            .collect()
    }
}

/// A window that behaves like a toolkit window: it unregisters itself from
/// inside `request_close` once it agrees to close.
pub struct MockWindow {
    name: String,
    kind: WindowKind,
    identifier: Option<MessageId>,
    account: Option<AccountId>,
    response: Mutex<CloseResponse>,
    log: Arc<CallLog>,
    manager: Option<WeakWindowManager>,
    me: Weak<MockWindow>,
    raises: AtomicUsize,
    fullscreen: Mutex<Option<bool>>,
    toolbar: Mutex<Option<bool>>,
}

impl MockWindow {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_dyn(self: &Arc<Self>) -> Arc<dyn WindowObject> {
        self.clone()
    }

    pub fn set_response(&self, response: CloseResponse) {
        *self.response.lock() = response;
    }

    pub fn raise_count(&self) -> usize {
        self.raises.load(Ordering::SeqCst)
    }

    pub fn fullscreen(&self) -> Option<bool> {
        *self.fullscreen.lock()
    }

    pub fn toolbar(&self) -> Option<bool> {
        *self.toolbar.lock()
    }
}

impl WindowObject for MockWindow {
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
        self.log.push(format!("close:{}", self.name));
        let response = *self.response.lock();
        if response.is_refused() {
            return response;
        }
        if let (Some(manager), Some(me)) = (self.manager.as_ref().and_then(|m| m.upgrade()), self.me.upgrade()) {
            let me: Arc<dyn WindowObject> = me;
            let _ = manager.unregister_window(&me);
        }
        response
    }

    fn set_toolbar_visible(&self, visible: bool) {
        *self.toolbar.lock() = Some(visible);
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        *self.fullscreen.lock() = Some(fullscreen);
    }

    fn raise(&self) {
        self.raises.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("raise:{}", self.name));
    }
}

pub struct MockWindowBuilder {
    name: String,
    kind: WindowKind,
    identifier: Option<MessageId>,
    account: Option<AccountId>,
    response: CloseResponse,
    log: Arc<CallLog>,
    manager: Option<WeakWindowManager>,
}

impl MockWindowBuilder {
    pub fn uid(mut self, uid: &str) -> Self {
        self.identifier = Some(MessageId::uid(uid));
        self
    }

    pub fn account(mut self, account: &str) -> Self {
        self.account = Some(AccountId::from(account));
        self
    }

    pub fn refusing(mut self) -> Self {
        self.response = CloseResponse::Cancelled;
        self
    }

    /// Leave unregistering to the manager.
    pub fn passive(mut self) -> Self {
        self.manager = None;
        self
    }

    pub fn build(self) -> Arc<MockWindow> {
        Arc::new_cyclic(|me| MockWindow {
            name: self.name,
            kind: self.kind,
            identifier: self.identifier,
            account: self.account,
            response: Mutex::new(self.response),
            log: self.log,
            manager: self.manager,
            me: me.clone(),
            raises: AtomicUsize::new(0),
            fullscreen: Mutex::new(None),
            toolbar: Mutex::new(None),
        })
    }
}

/// A modal dialog that logs close requests.
pub struct MockDialog {
    name: String,
    log: Arc<CallLog>,
    refuse: AtomicBool,
    modal: AtomicBool,
    presents: AtomicUsize,
}

impl MockDialog {
    pub fn new(name: &str, log: &Arc<CallLog>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            log: log.clone(),
            refuse: AtomicBool::new(false),
            modal: AtomicBool::new(false),
            presents: AtomicUsize::new(0),
        })
    }

    pub fn set_refusing(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::SeqCst);
    }

    pub fn is_modal(&self) -> bool {
        self.modal.load(Ordering::SeqCst)
    }

    pub fn present_count(&self) -> usize {
        self.presents.load(Ordering::SeqCst)
    }
}

impl ModalDialog for MockDialog {
    fn request_close(&self) -> CloseResponse {
        self.log.push(format!("close:{}", self.name));
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

/// Records cancellation requests.
#[derive(Default)]
pub struct RecordingOperations {
    cancelled: Mutex<Vec<WindowId>>,
}

impl RecordingOperations {
    pub fn cancelled(&self) -> Vec<WindowId> {
        self.cancelled.lock().clone()
    }
}

impl MailOperationQueue for RecordingOperations {
    fn cancel_by_source(&self, source: WindowId) {
        self.cancelled.lock().push(source);
    }
}

pub struct FakeAccountStore {
    pub removed: Signal<AccountId>,
}

impl FakeAccountStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { removed: Signal::new() })
    }
}

impl AccountStore for FakeAccountStore {
    fn account_removed(&self) -> &Signal<AccountId> {
        &self.removed
    }

    fn is_transport_account(&self, account: &AccountId) -> bool {
        account.as_str().starts_with("smtp")
    }
}

/// A manager wired to mocks.
pub struct Harness {
    pub queue: Arc<IdleQueue>,
    pub manager: WindowManager,
    pub log: Arc<CallLog>,
    pub operations: Arc<RecordingOperations>,
    pub events: Arc<Mutex<Vec<LifecycleEvent>>>,
    /// Windows the manager asked the factory for.
    pub synthesized: Arc<Mutex<Vec<Arc<MockWindow>>>>,
}

impl Harness {
    pub fn new(config: NavigationConfig) -> Self {
        init_tracing();

        let queue = Arc::new(IdleQueue::new());
        let log = Arc::new(CallLog::default());
        let operations = Arc::new(RecordingOperations::default());
        let synthesized: Arc<Mutex<Vec<Arc<MockWindow>>>> = Arc::new(Mutex::new(Vec::new()));

        // The factory needs the manager it belongs to; it is filled in below.
        let slot: Arc<Mutex<Option<WeakWindowManager>>> = Arc::new(Mutex::new(None));
        let factory = {
            let log = log.clone();
            let slot = slot.clone();
            let synthesized = synthesized.clone();
            move |kind: WindowKind| -> Arc<dyn WindowObject> {
                let window = MockWindowBuilder {
                    name: format!("initial-{kind}"),
                    kind,
                    identifier: None,
                    account: None,
                    response: CloseResponse::Closed,
                    log: log.clone(),
                    manager: slot.lock().clone(),
                }
                .build();
                synthesized.lock().push(window.clone());
                window
            }
        };

        let manager = WindowManager::builder(queue.clone(), Arc::new(factory))
            .with_config(config)
            .with_operation_queue(operations.clone())
            .build();
        *slot.lock() = Some(manager.downgrade());

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        manager.events().connect(move |event: &LifecycleEvent| sink.lock().push(*event));

        Self {
            queue,
            manager,
            log,
            operations,
            events,
            synthesized,
        }
    }

    /// Start a window that unregisters itself when it closes.
    pub fn window(&self, kind: WindowKind, name: &str) -> MockWindowBuilder {
        MockWindowBuilder {
            name: name.to_owned(),
            kind,
            identifier: None,
            account: None,
            response: CloseResponse::Closed,
            log: self.log.clone(),
            manager: Some(self.manager.downgrade()),
        }
    }

    /// Build and register a window, asserting it was committed.
    pub fn open(&self, window: MockWindowBuilder, parent: Option<&Arc<MockWindow>>) -> Arc<MockWindow> {
        let window = window.build();
        let parent = parent.map(MockWindow::as_dyn);
        let registration = self.manager.register_window(window.as_dyn(), parent.as_ref());
        assert!(registration.is_registered(), "{} not registered: {registration:?}", window.name());
        window
    }

    /// Kinds of the registered windows, top first.
    pub fn kinds(&self) -> Vec<WindowKind> {
        self.manager.windows().iter().map(|h| h.kind()).collect()
    }

    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().clone()
    }
}
