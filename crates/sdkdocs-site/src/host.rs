//! Capabilities the documentation controller needs from its host.
//!
//! A browser host backs these with the DOM, `location`, `localStorage` and
//! `navigator.clipboard`; the CLI backs them with in-memory state, a JSON file
//! and the system clipboard. Hosts translate their own events into
//! [`DocsEvent`](crate::DocsEvent) values instead of calling back into a
//! global instance.
//!
//! DOM-like capabilities take `&self`: the page is shared between the
//! controller and the copy flow, and implementations use interior mutability.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Page region the renderer writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Topic navigation list.
    Sidebar,
    /// Active topic content.
    Content,
}

/// The page the controller renders into.
pub trait Document: Send + Sync {
    /// Replace the sidebar container's contents.
    fn set_sidebar_html(&self, html: &str);

    /// Replace the content container's contents.
    fn set_content_html(&self, html: &str);

    /// Smoothly scroll the content container into view.
    fn scroll_content_into_view(&self);

    /// Top offset of a topic's in-page anchor relative to the viewport.
    ///
    /// `None` when the page has no anchor for the topic.
    fn anchor_top(&self, id: &str) -> Option<f64>;

    /// Apply or remove the document-wide dark theme.
    fn set_dark_mode(&self, dark: bool);

    /// Whether the dark theme is currently applied.
    fn is_dark_mode(&self) -> bool;

    /// Update the glyph on the theme toggle.
    fn set_theme_icon(&self, glyph: &str);
}

/// Transient feedback widgets: copy control labels and the global toast.
pub trait Feedback: Send + Sync {
    /// Current label of a copy control.
    fn control_label(&self, control: &str) -> String;

    /// Set a copy control's label; `copied` toggles its acknowledgement style.
    fn set_control_label(&self, control: &str, label: &str, copied: bool);

    /// Show the toast with a message.
    fn show_toast(&self, message: &str);

    /// Hide the toast (its text is left in place).
    fn hide_toast(&self);
}

/// The page URL's fragment and session history.
pub trait Location: Send + Sync {
    /// Current fragment including the leading `#`, or an empty string.
    fn hash(&self) -> String;

    /// Push `#fragment` as a new history entry without reloading.
    fn push_hash(&self, fragment: &str);
}

/// Durable key-value storage surviving reloads.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value synchronously.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Receives a notification after a region has been replaced.
///
/// Syntax highlighters hook in here to run a full scan. Receiving the
/// notification zero, one or several times must be harmless.
pub trait RenderListener: Send + Sync {
    /// Called after `region` was replaced.
    fn render_complete(&self, region: Region);
}

/// Asynchronous, write-only system clipboard.
pub trait Clipboard {
    /// Place text on the clipboard.
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;
}

/// Source of delays for cosmetic timeouts.
pub trait Timer {
    /// Resolve after `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Page-level capabilities handed to [`DocsController`](crate::DocsController).
#[derive(Clone)]
pub struct Host {
    /// Page regions, anchors and theme switch.
    pub document: Arc<dyn Document>,
    /// Copy control labels and toast.
    pub feedback: Arc<dyn Feedback>,
    /// URL fragment and history.
    pub location: Arc<dyn Location>,
    /// Preference storage.
    pub store: Arc<dyn KeyValueStore>,
    /// Optional render-complete subscriber (e.g. a syntax highlighter).
    pub listener: Option<Arc<dyn RenderListener>>,
}

/// Error writing to a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Backing file is not valid JSON.
    #[error("Invalid preferences file: {0}")]
    Json(#[from] serde_json::Error),
    /// Storage is disabled or full.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Error writing to a [`Clipboard`].
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// The host refused clipboard access.
    #[error("Clipboard permission denied")]
    PermissionDenied,
    /// The host has no clipboard.
    #[error("Clipboard not supported")]
    Unsupported,
    /// System clipboard failure.
    #[error("System clipboard failed: {0}")]
    System(String),
}
