//! Navigation policy.
//!
//! [`NavigationPolicy::evaluate`] decides what happens when a window asks to
//! be registered, given a snapshot of the registry and the open modal
//! dialogs. It is pure: it never touches a window, it only returns an
//! [`Outcome`] for the [`WindowManager`](crate::WindowManager) to carry out.
//!
//! # Rules
//!
//! Rules are applied in order; the first one that matches decides.
//!
//! 1. The current top has an open modal dialog: blocked.
//! 2. The registry is empty and a message window is requested: the initial
//!    window must be registered first.
//! 3. The window is already registered: already open.
//! 4. A header list or message is on top and a browsing level is requested:
//!    no going back, the current top stays.
//! 5. A second instance of a singleton kind is requested: already open.
//! 6. Another viewer or editor is bound to the same message: duplicate.
//! 7. A folder or mailbox list replaces one of the same kind on top.
//! 8. A window not above the current top in precedence replaces it, except a
//!    message opened from inside another message.
//! 9. A message window replaces a message window on top unless nested in it.
//!
//! Under [`ChromeStyle::MultiToplevel`] windows coexist, so only rules 1, 2,
//! 3, 5 and 6 apply.

use std::sync::Arc;

use crate::config::{ChromeStyle, DisplayStyle, NavigationConfig};
use crate::logging::targets;
use crate::window::{MessageId, WindowHandle, WindowId, WindowKind, WindowObject};

/// The result of evaluating a registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The window may be committed.
    Accepted,
    /// The window (or the singleton of its kind) is already open; raise it.
    RejectedAlreadyOpen(WindowHandle),
    /// Another window already shows this message; raise it.
    RejectedDuplicateMessage(WindowHandle),
    /// The current top has an open modal dialog.
    RejectedBlockedByModal,
    /// Opening would go backwards in the navigation hierarchy; raise the
    /// current top instead of replacing it.
    RejectedNoGoingBack(WindowHandle),
    /// The current top must close before the window may be committed.
    RequiresClosing(WindowHandle),
    /// The registry is empty; an initial window of this kind must be
    /// registered first and the request evaluated again.
    RequiresInitialWindow(WindowKind),
}

impl Outcome {
    /// Whether the request was rejected outright.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            Outcome::RejectedAlreadyOpen(_)
                | Outcome::RejectedDuplicateMessage(_)
                | Outcome::RejectedBlockedByModal
                | Outcome::RejectedNoGoingBack(_)
        )
    }

    /// The window that should be raised in place of the rejected one.
    pub fn blocking_window(&self) -> Option<&WindowHandle> {
        match self {
            Outcome::RejectedAlreadyOpen(h)
            | Outcome::RejectedDuplicateMessage(h)
            | Outcome::RejectedNoGoingBack(h) => Some(h),
            _ => None,
        }
    }
}

/// Read access to the modal dialogs the policy needs.
pub trait ModalView {
    /// Whether a modal dialog is transient to `owner`.
    fn has_modal_for(&self, owner: WindowId) -> bool;
}

impl<F: Fn(WindowId) -> bool> ModalView for F {
    fn has_modal_for(&self, owner: WindowId) -> bool {
        self(owner)
    }
}

impl ModalView for crate::modal::ModalStack {
    fn has_modal_for(&self, owner: WindowId) -> bool {
        crate::modal::ModalStack::has_modal_for(self, owner)
    }
}

/// A window asking to be registered.
pub struct NavigationRequest<'a> {
    /// The window being registered.
    pub window: &'a Arc<dyn WindowObject>,
    /// Its kind.
    pub kind: WindowKind,
    /// The message it is bound to, if any.
    pub identifier: Option<MessageId>,
    /// The registered window that opened it, if any.
    pub parent: Option<&'a WindowHandle>,
}

impl<'a> NavigationRequest<'a> {
    /// Build a request from a window object and its parent.
    pub fn new(window: &'a Arc<dyn WindowObject>, parent: Option<&'a WindowHandle>) -> Self {
        Self {
            window,
            kind: window.kind(),
            identifier: window.identifier(),
            parent,
        }
    }

    fn is_nested_message_of(&self, other: &WindowHandle) -> bool {
        self.kind == WindowKind::MessageView
            && other.kind() == WindowKind::MessageView
            && self.parent.is_some_and(|p| p == other)
    }

    fn has_message_parent(&self) -> bool {
        self.parent.is_some_and(|p| p.kind() == WindowKind::MessageView)
    }
}

/// The navigation rules, parameterized by chrome and display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationPolicy {
    chrome: ChromeStyle,
    display: DisplayStyle,
}

impl NavigationPolicy {
    /// Create a policy for the given styles.
    pub fn new(chrome: ChromeStyle, display: DisplayStyle) -> Self {
        Self { chrome, display }
    }

    /// Create a policy from a navigation config.
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new(config.chrome_style(), config.display_style())
    }

    /// The chrome style this policy applies.
    pub fn chrome_style(&self) -> ChromeStyle {
        self.chrome
    }

    /// The display style this policy applies.
    pub fn display_style(&self) -> DisplayStyle {
        self.display
    }

    /// The kind of the window shown first at startup.
    pub fn initial_kind(&self) -> WindowKind {
        match self.display {
            DisplayStyle::Simple => WindowKind::Accounts,
            DisplayStyle::Tree => WindowKind::Folder,
        }
    }

    /// Decide what happens to `request`.
    ///
    /// `snapshot` is the registry from top to bottom.
    pub fn evaluate(
        &self,
        snapshot: &[WindowHandle],
        modals: &dyn ModalView,
        request: &NavigationRequest<'_>,
    ) -> Outcome {
        let outcome = self.decide(snapshot, modals, request);
        tracing::debug!(
            target: targets::POLICY,
            kind = %request.kind,
            top = ?snapshot.first().map(WindowHandle::kind),
            ?outcome,
            "navigation evaluated"
        );
        outcome
    }

    fn decide(
        &self,
        snapshot: &[WindowHandle],
        modals: &dyn ModalView,
        request: &NavigationRequest<'_>,
    ) -> Outcome {
        let top = snapshot.first();

        // Modal dialogs are never registered windows, so a request can never
        // be the modal child of the top itself.
        if top.is_some_and(|t| modals.has_modal_for(t.id())) {
            return Outcome::RejectedBlockedByModal;
        }

        if snapshot.is_empty() && request.kind.is_message() {
            return Outcome::RequiresInitialWindow(self.initial_kind());
        }

        if let Some(existing) = snapshot.iter().find(|h| h.wraps(request.window)) {
            return Outcome::RejectedAlreadyOpen(existing.clone());
        }

        // A singleton below a blocking top must not be raised over it.
        if self.chrome == ChromeStyle::WindowStack {
            if let Some(top) = top.filter(|t| t.kind().blocks_going_back() && request.kind.is_browsing_level()) {
                return Outcome::RejectedNoGoingBack(top.clone());
            }
        }

        if request.kind.is_singleton() {
            if let Some(existing) = snapshot.iter().find(|h| h.kind() == request.kind) {
                return Outcome::RejectedAlreadyOpen(existing.clone());
            }
        }

        if request.kind.is_message() {
            if let Some(id) = &request.identifier {
                let duplicate = snapshot
                    .iter()
                    .find(|h| h.kind().is_message() && h.identifier().is_some_and(|own| own.matches(id)));
                if let Some(existing) = duplicate {
                    return Outcome::RejectedDuplicateMessage(existing.clone());
                }
            }
        }

        if self.chrome == ChromeStyle::MultiToplevel {
            return Outcome::Accepted;
        }

        let Some(top) = top else {
            return Outcome::Accepted;
        };

        if top.kind() == request.kind && request.kind.replaces_on_reopen() {
            return Outcome::RequiresClosing(top.clone());
        }

        if request.kind.precedence() <= top.kind().precedence() {
            if request.kind == WindowKind::MessageView && request.has_message_parent() {
                return Outcome::Accepted;
            }
            return Outcome::RequiresClosing(top.clone());
        }

        if request.kind.is_message() && top.kind().is_message() && !request.is_nested_message_of(top) {
            return Outcome::RequiresClosing(top.clone());
        }

        Outcome::Accepted
    }
}
