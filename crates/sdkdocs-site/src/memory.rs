//! In-memory host capabilities.
//!
//! [`MemoryDocument`], [`MemoryLocation`] and [`MemoryStore`] back the
//! headless CLI renderer and double as fakes in tests. They record what the
//! controller did so callers can inspect the resulting page.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use sdkdocs_renderer::COPY_LABEL;

use crate::host::{Document, Feedback, KeyValueStore, Location, StoreError};

/// Snapshot of everything written to a [`MemoryDocument`].
#[derive(Debug, Default)]
struct DocumentState {
    sidebar_html: String,
    content_html: String,
    sidebar_renders: usize,
    content_renders: usize,
    scroll_requests: usize,
    anchors: HashMap<String, f64>,
    dark: bool,
    theme_icon: String,
    labels: HashMap<String, String>,
    copied: HashSet<String>,
    toast_text: String,
    toast_visible: bool,
    toasts: Vec<String>,
}

/// In-memory page with sidebar, content, anchors, theme and feedback widgets.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    state: RwLock<DocumentState>,
}

impl MemoryDocument {
    /// Create an empty page in light mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport-relative top offset of a topic anchor.
    pub fn set_anchor_top(&self, id: &str, top: f64) {
        self.write().anchors.insert(id.to_owned(), top);
    }

    /// Remove all anchors.
    pub fn clear_anchors(&self) {
        self.write().anchors.clear();
    }

    /// Current sidebar markup.
    #[must_use]
    pub fn sidebar_html(&self) -> String {
        self.read().sidebar_html.clone()
    }

    /// Current content panel markup.
    #[must_use]
    pub fn content_html(&self) -> String {
        self.read().content_html.clone()
    }

    /// How many times the sidebar was replaced.
    #[must_use]
    pub fn sidebar_renders(&self) -> usize {
        self.read().sidebar_renders
    }

    /// How many times the content panel was replaced.
    #[must_use]
    pub fn content_renders(&self) -> usize {
        self.read().content_renders
    }

    /// How many smooth-scroll requests were made.
    #[must_use]
    pub fn scroll_requests(&self) -> usize {
        self.read().scroll_requests
    }

    /// Current glyph on the theme toggle.
    #[must_use]
    pub fn theme_icon(&self) -> String {
        self.read().theme_icon.clone()
    }

    /// Whether a copy control currently shows its acknowledgement style.
    #[must_use]
    pub fn is_copied(&self, control: &str) -> bool {
        self.read().copied.contains(control)
    }

    /// Current toast text (kept after hiding).
    #[must_use]
    pub fn toast_text(&self) -> String {
        self.read().toast_text.clone()
    }

    /// Whether the toast is visible.
    #[must_use]
    pub fn toast_visible(&self) -> bool {
        self.read().toast_visible
    }

    /// Every toast message shown, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<String> {
        self.read().toasts.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, DocumentState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, DocumentState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Document for MemoryDocument {
    fn set_sidebar_html(&self, html: &str) {
        let mut state = self.write();
        html.clone_into(&mut state.sidebar_html);
        state.sidebar_renders += 1;
    }

    fn set_content_html(&self, html: &str) {
        let mut state = self.write();
        html.clone_into(&mut state.content_html);
        state.content_renders += 1;
    }

    fn scroll_content_into_view(&self) {
        self.write().scroll_requests += 1;
    }

    fn anchor_top(&self, id: &str) -> Option<f64> {
        self.read().anchors.get(id).copied()
    }

    fn set_dark_mode(&self, dark: bool) {
        self.write().dark = dark;
    }

    fn is_dark_mode(&self) -> bool {
        self.read().dark
    }

    fn set_theme_icon(&self, glyph: &str) {
        glyph.clone_into(&mut self.write().theme_icon);
    }
}

impl Feedback for MemoryDocument {
    fn control_label(&self, control: &str) -> String {
        self.read()
            .labels
            .get(control)
            .cloned()
            .unwrap_or_else(|| COPY_LABEL.to_owned())
    }

    fn set_control_label(&self, control: &str, label: &str, copied: bool) {
        let mut state = self.write();
        state.labels.insert(control.to_owned(), label.to_owned());
        if copied {
            state.copied.insert(control.to_owned());
        } else {
            state.copied.remove(control);
        }
    }

    fn show_toast(&self, message: &str) {
        let mut state = self.write();
        message.clone_into(&mut state.toast_text);
        state.toast_visible = true;
        state.toasts.push(message.to_owned());
    }

    fn hide_toast(&self) {
        self.write().toast_visible = false;
    }
}

/// In-memory URL fragment with a history log.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    hash: RwLock<String>,
    history: RwLock<Vec<String>>,
}

impl MemoryLocation {
    /// Create a location with no fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a location whose URL already carries a fragment.
    #[must_use]
    pub fn with_hash(hash: impl Into<String>) -> Self {
        Self {
            hash: RwLock::new(hash.into()),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Change the fragment without a history push, as back/forward or a
    /// manual URL edit would.
    pub fn set_hash_externally(&self, hash: &str) {
        hash.clone_into(&mut self.hash.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// Fragments pushed by the controller, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Location for MemoryLocation {
    fn hash(&self) -> String {
        self.hash
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push_hash(&self, fragment: &str) {
        let hash = format!("#{fragment}");
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hash.clone());
        *self.hash.write().unwrap_or_else(PoisonError::into_inner) = hash;
    }
}

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value.
    #[must_use]
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
