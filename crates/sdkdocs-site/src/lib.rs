//! Documentation site state for sdkdocs.
//!
//! This crate holds everything about the single-page documentation site
//! except markup generation, which lives in `sdkdocs-renderer`:
//!
//! - [`Topics`] and [`ContentRegistry`], loaded once as a [`SiteContent`]
//! - [`DocsController`], which owns the active topic and reacts to [`DocsEvent`]s
//! - scroll-spy and hash resolution in [`navigator`]
//! - [`ThemePersistence`] for the light/dark preference
//! - [`copy_to_clipboard`] and [`show_toast`] for copy feedback
//!
//! The controller never reaches for globals. Everything it touches comes in
//! through the [`Host`] capabilities, so the same code drives a browser page,
//! the headless CLI renderer and the in-memory fakes used in tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use sdkdocs_site::{
//!     ControllerSettings, DocsController, Host, MemoryDocument, MemoryLocation, MemoryStore,
//!     SiteContent,
//! };
//!
//! let document = Arc::new(MemoryDocument::new());
//! let host = Host {
//!     document: Arc::<MemoryDocument>::clone(&document),
//!     feedback: Arc::<MemoryDocument>::clone(&document),
//!     location: Arc::new(MemoryLocation::new()),
//!     store: Arc::new(MemoryStore::new()),
//!     listener: None,
//! };
//!
//! let site = SiteContent::builtin(None).unwrap();
//! let mut controller = DocsController::start(site, host, ControllerSettings::default());
//! assert!(controller.navigate_to("faq"));
//! assert!(document.content_html().contains("<h1>"));
//! ```

mod clipboard;
mod content;
mod controller;
mod error;
mod file_store;
mod host;
mod memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod navigator;
mod theme;
mod topic;

pub use clipboard::{
    COPIED_LABEL, COPY_FAILURE_MESSAGE, COPY_SUCCESS_MESSAGE, CopyOutcome, CopySettings,
    DEFAULT_COPIED_LABEL_DURATION, DEFAULT_TOAST_DURATION, TokioTimer, copy_to_clipboard,
    show_toast,
};
pub use content::{ContentRegistry, MANIFEST_FILENAME, SiteContent};
pub use controller::{ControllerSettings, DocsController, DocsEvent};
pub use error::SiteError;
pub use file_store::FileStore;
pub use host::{
    Clipboard, ClipboardError, Document, Feedback, Host, KeyValueStore, Location, Region,
    RenderListener, StoreError, Timer,
};
pub use memory::{MemoryDocument, MemoryLocation, MemoryStore};
pub use navigator::ScrollThrottle;
pub use theme::{DEFAULT_THEME_KEY, ThemePersistence, ThemePreference};
pub use topic::{TopicEntry, Topics};
