//! Account removal handling.
//!
//! When an account is deleted while one of its folders or messages is on
//! screen, the windows showing its data must go. [`AccountWatcher`] listens
//! to the account store and, on the next loop turn, closes every window but
//! the initial one. The deferral lets an account-settings dialog that is
//! still closing finish first.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use mailnav_core::{ConnectionId, Scheduler, Signal};

use crate::logging::targets;
use crate::manager::{WeakWindowManager, WindowManager};

/// The name of a configured account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The account name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The account storage, as far as window management cares.
pub trait AccountStore: Send + Sync {
    /// Signal emitted after an account was removed.
    fn account_removed(&self) -> &Signal<AccountId>;

    /// Whether `account` is an outgoing (transport) account.
    fn is_transport_account(&self, account: &AccountId) -> bool;
}

struct WatcherState {
    manager: WeakWindowManager,
    store: Weak<dyn AccountStore>,
    scheduler: Arc<dyn Scheduler>,
    /// Set while a prune is scheduled but has not run yet.
    prune_pending: Arc<AtomicBool>,
}

impl WatcherState {
    fn on_account_removed(&self, account: &AccountId) -> bool {
        let Some(manager) = self.manager.upgrade() else {
            return false;
        };
        if let Some(store) = self.store.upgrade() {
            if store.is_transport_account(account) {
                tracing::trace!(target: targets::ACCOUNT, %account, "transport account removed, ignoring");
                return false;
            }
        }

        let top_account = manager.current_top().and_then(|top| top.window().account());
        if top_account.as_ref() != Some(account) {
            tracing::debug!(target: targets::ACCOUNT, %account, "removed account not on screen");
            return false;
        }

        if self.prune_pending.swap(true, Ordering::SeqCst) {
            tracing::debug!(target: targets::ACCOUNT, %account, "prune already scheduled");
            return false;
        }

        tracing::debug!(target: targets::ACCOUNT, %account, "scheduling close of windows above the initial one");
        let manager = manager.downgrade();
        let pending = self.prune_pending.clone();
        self.scheduler.schedule_deferred(Box::new(move || {
            pending.store(false, Ordering::SeqCst);
            if let Some(manager) = manager.upgrade() {
                if !manager.close_all_but_initial() {
                    tracing::info!(target: targets::ACCOUNT, "windows of removed account could not all be closed");
                }
            }
        }));
        true
    }
}

/// Closes windows showing data of removed accounts.
///
/// The watcher stays subscribed to the store until it is dropped.
///
/// # Example
///
/// ```ignore
/// let watcher = AccountWatcher::attach(&manager, account_store.clone(), scheduler.clone());
/// // ... later, at shutdown
/// drop(watcher);
/// ```
pub struct AccountWatcher {
    state: Arc<WatcherState>,
    store: Arc<dyn AccountStore>,
    connection: ConnectionId,
}

impl AccountWatcher {
    /// Subscribe to `store` on behalf of `manager`.
    pub fn attach(manager: &WindowManager, store: Arc<dyn AccountStore>, scheduler: Arc<dyn Scheduler>) -> Self {
        let state = Arc::new(WatcherState {
            manager: manager.downgrade(),
            store: Arc::downgrade(&store),
            scheduler,
            prune_pending: Arc::new(AtomicBool::new(false)),
        });

        let slot_state = state.clone();
        let connection = store.account_removed().connect(move |account| {
            slot_state.on_account_removed(account);
        });

        Self {
            state,
            store,
            connection,
        }
    }

    /// React to the removal of `account`.
    ///
    /// Returns whether a prune was scheduled.
    pub fn on_account_removed(&self, account: &AccountId) -> bool {
        self.state.on_account_removed(account)
    }
}

impl Drop for AccountWatcher {
    fn drop(&mut self) {
        self.store.account_removed().disconnect(self.connection);
    }
}
