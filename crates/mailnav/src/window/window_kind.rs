//! Window kind definitions.
//!
//! Every application window belongs to one of six archetypes. The kind decides
//! how the navigation policy treats the window and which chrome defaults it
//! receives.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The archetype of an application window.
///
/// Kinds are ordered by navigation precedence: `Accounts` is the lowest level
/// of the hierarchy and `MessageEdit` the highest. Opening a window whose
/// precedence is not above the current top normally replaces the top.
///
/// # Example
///
/// ```
/// use mailnav::window::WindowKind;
///
/// assert!(WindowKind::Folder.precedence() < WindowKind::Header.precedence());
/// assert!(WindowKind::MessageEdit.is_message());
/// assert!(WindowKind::Header.is_singleton());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// The account list.
    Accounts,
    /// The mailbox list of a multi-mailbox account.
    Mailboxes,
    /// The folder list of an account or mailbox.
    Folder,
    /// The message header list of one folder.
    Header,
    /// A message viewer.
    MessageView,
    /// A message editor.
    MessageEdit,
}

impl WindowKind {
    /// All kinds, in precedence order.
    pub const ALL: [WindowKind; 6] = [
        WindowKind::Accounts,
        WindowKind::Mailboxes,
        WindowKind::Folder,
        WindowKind::Header,
        WindowKind::MessageView,
        WindowKind::MessageEdit,
    ];

    /// The navigation precedence of this kind (0 = lowest).
    pub fn precedence(self) -> u8 {
        match self {
            WindowKind::Accounts => 0,
            WindowKind::Mailboxes => 1,
            WindowKind::Folder => 2,
            WindowKind::Header => 3,
            WindowKind::MessageView => 4,
            WindowKind::MessageEdit => 5,
        }
    }

    /// Whether this kind shows or edits a single message.
    pub fn is_message(self) -> bool {
        matches!(self, WindowKind::MessageView | WindowKind::MessageEdit)
    }

    /// Whether at most one window of this kind may be registered.
    pub fn is_singleton(self) -> bool {
        matches!(self, WindowKind::Accounts | WindowKind::Header)
    }

    /// Whether opening this kind on top of the same kind replaces the old one.
    pub fn replaces_on_reopen(self) -> bool {
        matches!(self, WindowKind::Folder | WindowKind::Mailboxes)
    }

    /// Whether this kind is a browsing level the user cannot go back to by
    /// opening a new window from a header list or message.
    pub fn is_browsing_level(self) -> bool {
        matches!(self, WindowKind::Accounts | WindowKind::Mailboxes | WindowKind::Folder)
    }

    /// Whether a window of this kind on top blocks opening a browsing level.
    pub fn blocks_going_back(self) -> bool {
        matches!(self, WindowKind::Header | WindowKind::MessageView | WindowKind::MessageEdit)
    }

    /// Default toolbar visibility for this kind, as `(normal, fullscreen)`.
    pub fn default_toolbar(self) -> (bool, bool) {
        match self {
            WindowKind::MessageView | WindowKind::MessageEdit => (true, false),
            _ => (true, true),
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowKind::Accounts => "accounts",
            WindowKind::Mailboxes => "mailboxes",
            WindowKind::Folder => "folder",
            WindowKind::Header => "header",
            WindowKind::MessageView => "message-view",
            WindowKind::MessageEdit => "message-edit",
        };
        f.write_str(name)
    }
}
