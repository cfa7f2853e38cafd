//! Window manager for registering windows and coordinating their lifecycle.
//!
//! The `WindowManager` owns the window registry and the modal stack. Every
//! window registers itself here when it is about to be shown; the manager
//! consults the [`NavigationPolicy`], closes whatever the policy says must
//! go, and then commits the window.
//!
//! One manager is created at startup and passed to every component that
//! needs it. Cloning a `WindowManager` is cheap and clones share state.

use std::sync::{Arc, Weak};

use mailnav_core::{Scheduler, Signal};
use parking_lot::Mutex;

use crate::config::{ChromeStyle, NavigationConfig};
use crate::error::{NavError, Result};
use crate::logging::{span_names, targets};
use crate::modal::{ModalDialog, ModalStack};
use crate::operations::{InitialWindowFactory, MailOperationQueue};
use crate::policy::{NavigationPolicy, NavigationRequest, Outcome};
use crate::window::{MessageId, WindowHandle, WindowId, WindowKind, WindowObject, WindowRegistry};

/// Notifications emitted by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A window was committed to the registry.
    WindowRegistered(WindowId),
    /// A window left the registry.
    WindowUnregistered(WindowId),
    /// The last registered window left the registry.
    WindowListEmpty,
    /// Fullscreen mode was switched.
    FullscreenChanged(bool),
}

/// The result of [`WindowManager::register_window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The window is registered and is the new top.
    Committed(WindowHandle),
    /// The policy rejected the window; the blocking window was raised.
    Rejected(Outcome),
    /// The window that had to close first refused to.
    CloseRefused(WindowHandle),
}

impl Registration {
    /// Whether the window ended up registered.
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Committed(_))
    }

    /// The committed handle, if the registration succeeded.
    pub fn handle(&self) -> Option<&WindowHandle> {
        match self {
            Registration::Committed(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Mutable manager state, guarded by one lock.
struct State {
    registry: WindowRegistry,
    fullscreen: bool,
    config: NavigationConfig,
}

struct Inner {
    state: Mutex<State>,
    modals: ModalStack,
    policy: NavigationPolicy,
    initial_windows: Arc<dyn InitialWindowFactory>,
    operations: Option<Arc<dyn MailOperationQueue>>,
    events: Signal<LifecycleEvent>,
}

/// Builder for [`WindowManager`].
pub struct WindowManagerBuilder {
    scheduler: Arc<dyn Scheduler>,
    initial_windows: Arc<dyn InitialWindowFactory>,
    operations: Option<Arc<dyn MailOperationQueue>>,
    config: NavigationConfig,
}

impl WindowManagerBuilder {
    /// Start a builder with the collaborators every manager needs.
    pub fn new(scheduler: Arc<dyn Scheduler>, initial_windows: Arc<dyn InitialWindowFactory>) -> Self {
        Self {
            scheduler,
            initial_windows,
            operations: None,
            config: NavigationConfig::default(),
        }
    }

    /// Set the navigation configuration.
    pub fn with_config(mut self, config: NavigationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the operation queue asked to cancel work of closing windows.
    pub fn with_operation_queue(mut self, operations: Arc<dyn MailOperationQueue>) -> Self {
        self.operations = Some(operations);
        self
    }

    /// Build the manager.
    pub fn build(self) -> WindowManager {
        let policy = NavigationPolicy::from_config(&self.config);
        WindowManager {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    registry: WindowRegistry::new(),
                    fullscreen: self.config.fullscreen(),
                    config: self.config,
                }),
                modals: ModalStack::new(self.scheduler),
                policy,
                initial_windows: self.initial_windows,
                operations: self.operations,
                events: Signal::new(),
            }),
        }
    }
}

/// Registers windows and coordinates their lifecycle.
///
/// # Example
///
/// ```ignore
/// let manager = WindowManager::builder(scheduler, initial_windows).build();
///
/// match manager.register_window(folder_window, Some(&accounts_window)) {
///     Registration::Committed(handle) => println!("showing {:?}", handle.id()),
///     other => println!("not shown: {:?}", other),
/// }
/// ```
#[derive(Clone)]
pub struct WindowManager {
    inner: Arc<Inner>,
}

/// A weak reference to a [`WindowManager`].
#[derive(Clone)]
pub struct WeakWindowManager {
    inner: Weak<Inner>,
}

impl WeakWindowManager {
    /// Get the manager back, if it still exists.
    pub fn upgrade(&self) -> Option<WindowManager> {
        self.inner.upgrade().map(|inner| WindowManager { inner })
    }
}

impl WindowManager {
    /// Start building a window manager.
    pub fn builder(
        scheduler: Arc<dyn Scheduler>,
        initial_windows: Arc<dyn InitialWindowFactory>,
    ) -> WindowManagerBuilder {
        WindowManagerBuilder::new(scheduler, initial_windows)
    }

    /// Create a weak reference to this manager.
    pub fn downgrade(&self) -> WeakWindowManager {
        WeakWindowManager {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// The navigation policy in effect.
    pub fn policy(&self) -> NavigationPolicy {
        self.inner.policy
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a window that is about to be shown.
    ///
    /// `parent` is the registered window the new one was opened from. If the
    /// policy requires the current top to close first, it is asked to; a
    /// refusal aborts the registration and leaves the registry unchanged.
    /// On rejection the window that blocked the request is raised.
    pub fn register_window(
        &self,
        window: Arc<dyn WindowObject>,
        parent: Option<&Arc<dyn WindowObject>>,
    ) -> Registration {
        let kind = window.kind();
        let _span = tracing::debug_span!(target: targets::LIFECYCLE, span_names::REGISTER, %kind).entered();

        let parent = parent.and_then(|p| {
            let handle = self.find_handle(p);
            if handle.is_none() {
                tracing::warn!(target: targets::LIFECYCLE, "parent window is not registered, ignoring it");
            }
            handle
        });

        let mut synthesized_initial = false;
        loop {
            let snapshot = self.inner.state.lock().registry.snapshot();
            let request = NavigationRequest::new(&window, parent.as_ref());
            let outcome = self.inner.policy.evaluate(&snapshot, &self.inner.modals, &request);

            match outcome {
                Outcome::Accepted => break,
                Outcome::RequiresInitialWindow(initial_kind) => {
                    if synthesized_initial {
                        tracing::error!(target: targets::LIFECYCLE, "initial window did not stay registered");
                        return Registration::Rejected(outcome);
                    }
                    synthesized_initial = true;
                    tracing::debug!(target: targets::LIFECYCLE, %initial_kind, "synthesizing initial window");
                    let initial = self.inner.initial_windows.create_initial_window(initial_kind);
                    if !self.register_window(initial, None).is_registered() {
                        return Registration::Rejected(outcome);
                    }
                }
                Outcome::RequiresClosing(target) => {
                    if !self.close_window(&target) {
                        target.window().raise();
                        return Registration::CloseRefused(target);
                    }
                    break;
                }
                rejected => {
                    self.raise_blocker(&rejected);
                    return Registration::Rejected(rejected);
                }
            }
        }

        Registration::Committed(self.commit(window, parent.as_ref()))
    }

    fn commit(&self, window: Arc<dyn WindowObject>, parent: Option<&WindowHandle>) -> WindowHandle {
        let handle = WindowHandle::new(window, parent);
        let (fullscreen, toolbar) = {
            let mut state = self.inner.state.lock();
            state.registry.register(handle.clone());
            let fullscreen = state.fullscreen;
            (fullscreen, state.config.toolbar_visible(handle.kind(), fullscreen))
        };

        let manager = self.downgrade();
        let id = handle.id();
        let observer = handle.close_requested().connect(move |_| {
            if let Some(manager) = manager.upgrade() {
                manager.handle_close_request(id);
            }
        });
        handle.attach_close_observer(observer);

        handle.window().set_toolbar_visible(toolbar);
        handle.window().set_fullscreen(fullscreen);

        tracing::debug!(target: targets::LIFECYCLE, %id, kind = %handle.kind(), "window registered");
        self.inner.events.emit(LifecycleEvent::WindowRegistered(id));
        handle
    }

    fn raise_blocker(&self, outcome: &Outcome) {
        if let Some(blocker) = outcome.blocking_window() {
            blocker.window().raise();
        } else if let Outcome::RejectedBlockedByModal = outcome {
            if let Some(dialog) = self.inner.modals.active_modal() {
                dialog.present();
            }
        }
    }

    /// Unregister a window that has been destroyed.
    ///
    /// Detaches the close observer and any modal entries, asks the operation
    /// queue to cancel work started from the window, and removes it.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotRegistered`] if the window is unknown; nothing
    /// else happens in that case.
    pub fn unregister_window(&self, window: &Arc<dyn WindowObject>) -> Result<()> {
        let Some(handle) = self.find_handle(window) else {
            let err = NavError::not_registered(window.kind());
            tracing::error!(target: targets::LIFECYCLE, %err, "unregister of unknown window");
            return Err(err);
        };
        self.unregister_handle(&handle, true);
        Ok(())
    }

    /// Returns `false` if the handle was already gone. With `raise_next`, the
    /// window left on top is raised under the window stack chrome.
    fn unregister_handle(&self, handle: &WindowHandle, raise_next: bool) -> bool {
        let id = handle.id();
        let _span = tracing::debug_span!(target: targets::LIFECYCLE, span_names::UNREGISTER, %id).entered();

        let (empty, new_top) = {
            let mut state = self.inner.state.lock();
            if state.registry.unregister(id).is_none() {
                return false;
            }
            (state.registry.is_empty(), state.registry.top().cloned())
        };

        handle.detach_close_observer();
        let dropped = self.inner.modals.clear_owner(id);
        if dropped > 0 {
            tracing::warn!(target: targets::LIFECYCLE, %id, dropped, "window unregistered with modal dialogs open");
        }
        handle.set_modal(false);
        if let Some(operations) = &self.inner.operations {
            operations.cancel_by_source(id);
        }

        tracing::debug!(target: targets::LIFECYCLE, %id, kind = %handle.kind(), "window unregistered");
        self.inner.events.emit(LifecycleEvent::WindowUnregistered(id));

        if empty {
            self.inner.events.emit(LifecycleEvent::WindowListEmpty);
        } else if raise_next && self.inner.policy.chrome_style() == ChromeStyle::WindowStack {
            if let Some(top) = new_top {
                top.window().raise();
            }
        }
        true
    }

    /// Handle a close the user started from the window's own chrome.
    ///
    /// Refused while a modal dialog is transient to the window. Returns
    /// whether the window was unregistered.
    pub fn notify_close_requested(&self, window: &Arc<dyn WindowObject>) -> bool {
        match self.find_handle(window) {
            Some(handle) => self.handle_close_request(handle.id()),
            None => {
                tracing::warn!(target: targets::LIFECYCLE, kind = %window.kind(), "close request from unknown window");
                false
            }
        }
    }

    fn handle_close_request(&self, id: WindowId) -> bool {
        let Some(handle) = self.inner.state.lock().registry.get(id).cloned() else {
            return false;
        };
        if self.inner.modals.has_modal_for(id) {
            tracing::info!(target: targets::LIFECYCLE, %id, "close refused while a modal dialog is open");
            if let Some(dialog) = self.inner.modals.active_modal() {
                dialog.present();
            }
            return false;
        }
        self.unregister_handle(&handle, true)
    }

    /// Close a registered window: its modal dialogs first, then the window.
    ///
    /// Returns `false` if a dialog or the window refused.
    fn close_window(&self, handle: &WindowHandle) -> bool {
        if !self.inner.modals.close_active_modals(handle.id()) {
            return false;
        }
        handle.set_modal(false);

        let response = handle.window().request_close();
        if response.is_refused() {
            tracing::info!(target: targets::LIFECYCLE, id = %handle.id(), "window refused to close");
            return false;
        }
        tracing::debug!(target: targets::LIFECYCLE, id = %handle.id(), ?response, "window closed");

        // The window may have unregistered itself while closing.
        self.unregister_handle(handle, true);
        true
    }

    // =========================================================================
    // Close chains
    // =========================================================================

    /// Close every window, top first.
    ///
    /// Stops at the first refusal and returns `false`; windows below the
    /// refusing one stay open.
    pub fn close_all_windows(&self) -> bool {
        let _span = tracing::debug_span!(target: targets::LIFECYCLE, span_names::CLOSE_CHAIN, keep_initial = false).entered();
        self.close_down_to(0)
    }

    /// Close every window except the initial one.
    ///
    /// Fails without closing anything if a modal dialog of the current top
    /// refuses to close.
    pub fn close_all_but_initial(&self) -> bool {
        let _span = tracing::debug_span!(target: targets::LIFECYCLE, span_names::CLOSE_CHAIN, keep_initial = true).entered();
        if let Some(top) = self.current_top() {
            if !self.inner.modals.close_active_modals(top.id()) {
                tracing::info!(target: targets::LIFECYCLE, "close all but initial aborted by a modal dialog");
                return false;
            }
            top.set_modal(false);
        }
        self.close_down_to(1)
    }

    fn close_down_to(&self, keep: usize) -> bool {
        loop {
            let top = {
                let state = self.inner.state.lock();
                if state.registry.count() <= keep {
                    return true;
                }
                state.registry.top().cloned()
            };
            let Some(top) = top else {
                return true;
            };
            if !self.close_window(&top) {
                return false;
            }
        }
    }

    /// Unregister every remaining window, most recently registered first,
    /// without asking them to close or raising the ones left behind.
    pub fn shutdown(&self) {
        loop {
            let top = self.inner.state.lock().registry.top().cloned();
            let Some(top) = top else {
                return;
            };
            self.unregister_handle(&top, false);
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    fn find_handle(&self, window: &Arc<dyn WindowObject>) -> Option<WindowHandle> {
        self.inner.state.lock().registry.find_by_window(window).cloned()
    }

    /// Find the registered window of `kind` bound to message `id`.
    pub fn find_registered_by_identifier(&self, kind: WindowKind, id: &MessageId) -> Option<WindowHandle> {
        self.inner.state.lock().registry.find_by_identifier(Some(kind), id).cloned()
    }

    /// Find a registered viewer or editor bound to message `id`.
    pub fn find_registered_message(&self, id: &MessageId) -> Option<WindowHandle> {
        self.inner.state.lock().registry.find_by_identifier(None, id).cloned()
    }

    /// The handle of a registered window object.
    pub fn handle_of(&self, window: &Arc<dyn WindowObject>) -> Option<WindowHandle> {
        self.find_handle(window)
    }

    /// The current top window.
    pub fn current_top(&self) -> Option<WindowHandle> {
        self.inner.state.lock().registry.top().cloned()
    }

    /// The initial (bottom-most) window.
    pub fn initial_window(&self) -> Option<WindowHandle> {
        self.inner.state.lock().registry.bottom().cloned()
    }

    /// Get the number of registered windows.
    pub fn window_count(&self) -> usize {
        self.inner.state.lock().registry.count()
    }

    /// All registered windows, top first.
    pub fn windows(&self) -> Vec<WindowHandle> {
        self.inner.state.lock().registry.snapshot()
    }

    // =========================================================================
    // Pending messages
    // =========================================================================

    /// Record that a window for message `id` is being prepared.
    ///
    /// Returns `false` if a window for it is already pending or open.
    pub fn register_pending_message(&self, id: MessageId) -> bool {
        let mut state = self.inner.state.lock();
        if state.registry.find_by_identifier(None, &id).is_some() {
            return false;
        }
        state.registry.register_pending_message(id)
    }

    /// Forget a pending message, e.g. because fetching it failed.
    pub fn unregister_pending_message(&self, id: &MessageId) -> bool {
        self.inner.state.lock().registry.unregister_pending_message(id)
    }

    /// Whether a window for message `id` is being prepared.
    pub fn is_message_pending(&self, id: &MessageId) -> bool {
        self.inner.state.lock().registry.is_message_pending(id)
    }

    // =========================================================================
    // Chrome
    // =========================================================================

    /// Switch fullscreen mode for every registered window.
    pub fn set_fullscreen_mode(&self, fullscreen: bool) {
        let (changed, windows, config) = {
            let mut state = self.inner.state.lock();
            let changed = state.fullscreen != fullscreen;
            state.fullscreen = fullscreen;
            (changed, state.registry.snapshot(), state.config.clone())
        };

        for handle in &windows {
            handle.window().set_fullscreen(fullscreen);
            handle
                .window()
                .set_toolbar_visible(config.toolbar_visible(handle.kind(), fullscreen));
        }

        if changed {
            self.inner.events.emit(LifecycleEvent::FullscreenChanged(fullscreen));
        }
    }

    /// Whether fullscreen mode is on.
    pub fn fullscreen_mode(&self) -> bool {
        self.inner.state.lock().fullscreen
    }

    /// Set toolbar visibility for windows of `kind` in one fullscreen mode.
    ///
    /// Registered windows of that kind are updated if the manager is
    /// currently in that mode; new windows pick up the setting either way.
    pub fn show_toolbars(&self, kind: WindowKind, show: bool, fullscreen: bool) {
        let matching: Vec<WindowHandle> = {
            let mut state = self.inner.state.lock();
            state.config.set_toolbar_visible(kind, fullscreen, show);
            if state.fullscreen != fullscreen {
                return;
            }
            state.registry.iter().filter(|h| h.kind() == kind).cloned().collect()
        };
        for handle in matching {
            handle.window().set_toolbar_visible(show);
        }
    }

    // =========================================================================
    // Modal dialogs
    // =========================================================================

    /// Show `dialog` as modal to the registered window `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::UnknownModalOwner`] if `owner` is not registered.
    pub fn set_modal(&self, dialog: Arc<dyn ModalDialog>, owner: &Arc<dyn WindowObject>) -> Result<()> {
        let Some(owner_handle) = self.find_handle(owner) else {
            let err = NavError::UnknownModalOwner { kind: owner.kind() };
            tracing::error!(target: targets::MODAL, %err, "modal dialog without a registered owner");
            return Err(err);
        };
        self.inner.modals.push_modal(dialog, owner_handle.id());
        owner_handle.set_modal(true);
        Ok(())
    }

    /// The active modal dialog.
    pub fn modal(&self) -> Option<Arc<dyn ModalDialog>> {
        self.inner.modals.active_modal()
    }

    /// Record that a modal dialog was dismissed.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::UnknownModal`] if the dialog is not on the stack.
    pub fn dismiss_modal(&self, dialog: &Arc<dyn ModalDialog>) -> Result<()> {
        let Some(owner) = self.inner.modals.pop_modal(dialog) else {
            tracing::error!(target: targets::MODAL, "dismissed dialog was never set modal");
            return Err(NavError::UnknownModal);
        };
        if !self.inner.modals.has_modal_for(owner) {
            if let Some(handle) = self.inner.state.lock().registry.get(owner) {
                handle.set_modal(false);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Signal emitted on every lifecycle change.
    pub fn events(&self) -> &Signal<LifecycleEvent> {
        &self.inner.events
    }
}

static_assertions::assert_impl_all!(WindowManager: Send, Sync);
