//! Headless host: drives a [`DocsController`] without a browser.
//!
//! Pages render into a [`MemoryDocument`]; the theme preference lives in a
//! JSON [`FileStore`]; copies go to the system clipboard through `arboard`
//! and feedback is reported on the terminal.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use sdkdocs_config::Config;
use sdkdocs_renderer::{COPY_LABEL, PageData, render_page};
use sdkdocs_site::{
    Clipboard, ClipboardError, ControllerSettings, CopySettings, DocsController, Document,
    Feedback, FileStore, Host, KeyValueStore, Location, MemoryDocument, MemoryLocation,
    SiteContent,
};

use crate::error::CliError;
use crate::output::Output;

/// Load the configured site: a content directory or the built-in pages.
pub(crate) fn load_site(config: &Config) -> Result<SiteContent, CliError> {
    let default_topic = config.site_resolved.default_topic.as_deref();
    let site = match &config.site_resolved.content_dir {
        Some(dir) => SiteContent::load_dir(dir, default_topic)?,
        None => SiteContent::builtin(default_topic)?,
    };
    Ok(site)
}

/// Controller tunables from configuration.
pub(crate) fn controller_settings(config: &Config) -> ControllerSettings {
    ControllerSettings {
        scroll_threshold: config.navigation.scroll_threshold_px,
        scroll_throttle: config.navigation.scroll_throttle(),
        theme_key: config.theme.storage_key.clone(),
        copy: CopySettings {
            label_duration: config.feedback.copied_label(),
            toast_duration: config.feedback.toast(),
        },
    }
}

/// Preference store for this project.
pub(crate) fn preference_store(config: &Config) -> Arc<FileStore> {
    Arc::new(FileStore::new(config.site_resolved.preferences_path()))
}

/// A controller rendering into memory, ready for snapshots.
pub(crate) struct HeadlessPage {
    document: Arc<MemoryDocument>,
    controller: DocsController,
    title: String,
}

impl HeadlessPage {
    /// Start a page as a browser would on load, with the given URL fragment.
    ///
    /// Copy feedback lands in the in-memory document unless `feedback` is given.
    pub(crate) fn start(
        site: SiteContent,
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        feedback: Option<Arc<dyn Feedback>>,
        hash: &str,
    ) -> Self {
        let document = Arc::new(MemoryDocument::new());
        let feedback = feedback.unwrap_or_else(|| Arc::clone(&document) as Arc<dyn Feedback>);
        let host = Host {
            document: Arc::clone(&document) as Arc<dyn Document>,
            feedback,
            location: Arc::new(MemoryLocation::with_hash(hash)) as Arc<dyn Location>,
            store,
            listener: None,
        };
        let controller = DocsController::start(site, host, controller_settings(config));
        Self {
            document,
            controller,
            title: config.site_resolved.title.clone(),
        }
    }

    pub(crate) fn controller(&self) -> &DocsController {
        &self.controller
    }

    pub(crate) fn controller_mut(&mut self) -> &mut DocsController {
        &mut self.controller
    }

    pub(crate) fn document(&self) -> &MemoryDocument {
        &self.document
    }

    /// Full HTML page for the current state.
    pub(crate) fn snapshot(&self) -> String {
        let active = self.controller.active_topic();
        let topic_title = self
            .controller
            .site()
            .topics()
            .get(active)
            .map(|topic| topic.title.as_str());
        let sidebar_html = self.document.sidebar_html();
        let content_html = self.document.content_html();
        let theme_icon = self.document.theme_icon();

        render_page(&PageData {
            title: &self.title,
            topic_title,
            sidebar_html: &sidebar_html,
            content_html: &content_html,
            dark: self.document.is_dark_mode(),
            theme_icon: &theme_icon,
        })
    }
}

/// System clipboard via `arboard`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> {
        let result = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text))
            .map_err(|e| match e {
                arboard::Error::ClipboardNotSupported => ClipboardError::Unsupported,
                other => ClipboardError::System(other.to_string()),
            });
        std::future::ready(result)
    }
}

/// Feedback widgets rendered as terminal lines.
pub(crate) struct TerminalFeedback {
    output: Output,
    labels: RwLock<HashMap<String, String>>,
}

impl TerminalFeedback {
    pub(crate) fn new() -> Self {
        Self {
            output: Output::new(),
            labels: RwLock::new(HashMap::new()),
        }
    }
}

impl Feedback for TerminalFeedback {
    fn control_label(&self, control: &str) -> String {
        self.labels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(control)
            .cloned()
            .unwrap_or_else(|| COPY_LABEL.to_owned())
    }

    fn set_control_label(&self, control: &str, label: &str, copied: bool) {
        self.labels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(control.to_owned(), label.to_owned());

        if copied {
            self.output.success(&format!("[{control}] {label}"));
        } else {
            self.output.muted(&format!("[{control}] {label}"));
        }
    }

    fn show_toast(&self, message: &str) {
        self.output.highlight(message);
    }

    fn hide_toast(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdkdocs_renderer::copy_sources;
    use sdkdocs_site::mock::{InstantTimer, ScriptedClipboard};
    use sdkdocs_site::{COPY_SUCCESS_MESSAGE, CopyOutcome, DEFAULT_THEME_KEY, MemoryStore};

    fn start(store: MemoryStore, hash: &str) -> HeadlessPage {
        let config = Config::default();
        let site = load_site(&config).unwrap();
        HeadlessPage::start(site, &config, Arc::new(store), None, hash)
    }

    #[test]
    fn test_snapshot_of_startup_hash() {
        let page = start(MemoryStore::new(), "#faq");
        assert_eq!(page.controller().active_topic(), "faq");

        let html = page.snapshot();
        assert!(html.contains("<title>FAQ - AzizbekID Documentation</title>"));
        assert!(html.contains("<body>"));
        assert!(html.contains("id=\"themeToggle\" class=\"theme-toggle\">🌙</button>"));
    }

    #[test]
    fn test_snapshot_in_dark_mode() {
        let page = start(MemoryStore::new().with_value(DEFAULT_THEME_KEY, "dark"), "");
        let html = page.snapshot();
        assert!(html.contains("<body class=\"alt-theme\">"));
        assert!(html.contains("☀️"));
    }

    #[test]
    fn test_copy_reports_into_document_by_default() {
        let mut page = start(MemoryStore::new(), "");
        assert!(page.controller_mut().navigate_to("quick-example"));
        let sources = copy_sources(&page.document().content_html());
        let clipboard = ScriptedClipboard::accepting();

        let outcome = block_on(page.controller().copy_to_clipboard(
            &clipboard,
            &InstantTimer,
            "quick-example[0]",
            &sources[0],
        ));

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(page.document().toasts(), vec![COPY_SUCCESS_MESSAGE.to_owned()]);
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
            .block_on(future)
    }
}
