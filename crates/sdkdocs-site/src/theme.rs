//! Light/dark theme preference and its persistence.

use std::fmt;
use std::sync::Arc;

use crate::host::{Document, KeyValueStore, StoreError};

/// Default storage key for the preference.
pub const DEFAULT_THEME_KEY: &str = "theme-pref";

/// Persisted display mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    /// Light mode (default).
    #[default]
    Light,
    /// Dark mode.
    Dark,
}

impl ThemePreference {
    /// Interpret a stored value. Only exactly `"dark"` selects dark mode.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Value written to storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Glyph shown on the toggle: the mode a click would switch to.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }

    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes the theme preference and applies it to a document.
///
/// The document's dark flag is the source of truth for the current mode;
/// storage only records it for the next session.
#[derive(Clone)]
pub struct ThemePersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ThemePersistence {
    /// Create a persistence helper using `key` in `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Preference recorded in storage (light when absent).
    #[must_use]
    pub fn stored(&self) -> ThemePreference {
        ThemePreference::from_stored(self.store.get(&self.key).as_deref())
    }

    /// Apply the stored preference at startup.
    ///
    /// Only switches dark mode on; a light or missing preference leaves the
    /// document as it is. Always refreshes the toggle icon, so calling it
    /// repeatedly is harmless.
    pub fn restore(&self, document: &dyn Document) -> ThemePreference {
        if self.stored() == ThemePreference::Dark {
            document.set_dark_mode(true);
        }
        let current = ThemePreference::from_dark(document.is_dark_mode());
        document.set_theme_icon(current.icon());
        current
    }

    /// Flip the document's mode, persist it and update the icon.
    ///
    /// A storage failure is logged; the visible switch still happens.
    pub fn toggle(&self, document: &dyn Document) -> ThemePreference {
        let next = ThemePreference::from_dark(document.is_dark_mode()).toggled();
        document.set_dark_mode(next == ThemePreference::Dark);
        if let Err(e) = self.persist(next) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist theme preference");
        }
        document.set_theme_icon(next.icon());
        next
    }

    /// Write a preference without touching any document.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails.
    pub fn persist(&self, preference: ThemePreference) -> Result<(), StoreError> {
        self.store.set(&self.key, preference.as_str())
    }
}
