//! Navigation configuration and builder.
//!
//! This module provides `NavigationConfig`, which selects the navigation
//! style and the chrome defaults applied to newly registered windows. It can
//! be built in code or loaded from a TOML file:
//!
//! ```toml
//! display_style = "tree"
//! chrome_style = "window_stack"
//! fullscreen = false
//!
//! [toolbars.message_view]
//! normal = true
//! fullscreen = false
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logging::targets;
use crate::window::WindowKind;

/// How windows are laid out by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromeStyle {
    /// One visible window at a time, stacked; opening a window may replace
    /// the one on top.
    #[default]
    WindowStack,
    /// Independent top-level windows that coexist.
    MultiToplevel,
}

/// How the account and folder hierarchy is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    /// Accounts, then folders, then headers, each in its own window.
    #[default]
    Simple,
    /// A folder tree is the first window.
    Tree,
}

/// Toolbar visibility for one window kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarSettings {
    /// Visible when not fullscreen.
    pub normal: bool,
    /// Visible when fullscreen.
    pub fullscreen: bool,
}

impl ToolbarSettings {
    /// The setting for the given fullscreen mode.
    pub fn visible(&self, fullscreen: bool) -> bool {
        if fullscreen { self.fullscreen } else { self.normal }
    }

    fn set(&mut self, fullscreen: bool, visible: bool) {
        if fullscreen {
            self.fullscreen = visible;
        } else {
            self.normal = visible;
        }
    }
}

/// Errors raised while loading a navigation config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read navigation config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid TOML for this schema.
    #[error("Invalid navigation config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the window manager.
///
/// # Example
///
/// ```
/// use mailnav::config::{ChromeStyle, DisplayStyle, NavigationConfig};
/// use mailnav::window::WindowKind;
///
/// let config = NavigationConfig::new()
///     .with_display_style(DisplayStyle::Tree)
///     .with_chrome_style(ChromeStyle::WindowStack)
///     .with_toolbar(WindowKind::Header, true, false);
///
/// assert!(!config.toolbar_visible(WindowKind::Header, true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    display_style: DisplayStyle,
    chrome_style: ChromeStyle,
    /// Whether the application starts in fullscreen mode.
    fullscreen: bool,
    /// Overrides of the per-kind toolbar defaults.
    toolbars: HashMap<WindowKind, ToolbarSettings>,
}

impl NavigationConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "navigation config loaded");
        Ok(config)
    }

    /// Set the display style.
    pub fn with_display_style(mut self, style: DisplayStyle) -> Self {
        self.display_style = style;
        self
    }

    /// Set the chrome style.
    pub fn with_chrome_style(mut self, style: ChromeStyle) -> Self {
        self.chrome_style = style;
        self
    }

    /// Set whether the application starts fullscreen.
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Set toolbar visibility for `kind`, as `(normal, fullscreen)`.
    pub fn with_toolbar(mut self, kind: WindowKind, normal: bool, fullscreen: bool) -> Self {
        self.toolbars.insert(kind, ToolbarSettings { normal, fullscreen });
        self
    }

    /// The display style.
    pub fn display_style(&self) -> DisplayStyle {
        self.display_style
    }

    /// The chrome style.
    pub fn chrome_style(&self) -> ChromeStyle {
        self.chrome_style
    }

    /// Whether the application starts fullscreen.
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Effective toolbar settings for `kind`.
    pub fn toolbar(&self, kind: WindowKind) -> ToolbarSettings {
        self.toolbars.get(&kind).copied().unwrap_or_else(|| {
            let (normal, fullscreen) = kind.default_toolbar();
            ToolbarSettings { normal, fullscreen }
        })
    }

    /// Whether windows of `kind` show their toolbar in the given mode.
    pub fn toolbar_visible(&self, kind: WindowKind, fullscreen: bool) -> bool {
        self.toolbar(kind).visible(fullscreen)
    }

    /// Update toolbar visibility for `kind` in one mode.
    pub fn set_toolbar_visible(&mut self, kind: WindowKind, fullscreen: bool, visible: bool) {
        let mut settings = self.toolbar(kind);
        settings.set(fullscreen, visible);
        self.toolbars.insert(kind, settings);
    }
}
