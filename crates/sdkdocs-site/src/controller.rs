//! The documentation page controller.
//!
//! [`DocsController`] owns the active topic and drives every page update.
//! Hosts construct it with their capabilities, call [`DocsController::start`]
//! once, then translate user and browser events into [`DocsEvent`] values:
//!
//! ```text
//! sidebar click   -> DocsEvent::Navigate(id)
//! hashchange      -> DocsEvent::HashChanged
//! scroll          -> DocsEvent::Scrolled      (coalesced internally)
//! animation frame -> DocsEvent::ScrollTick    (releases deferred scroll-spy)
//! theme button    -> DocsEvent::ToggleTheme
//! ```
//!
//! Copy controls are asynchronous and go through
//! [`DocsController::copy_to_clipboard`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use sdkdocs_renderer::{NavLink, render_content, render_sidebar};

use crate::clipboard::{CopyOutcome, CopySettings};
use crate::content::SiteContent;
use crate::host::{Clipboard, Host, Region, Timer};
use crate::navigator::{
    DEFAULT_SCROLL_THRESHOLD, DEFAULT_SCROLL_THROTTLE, ScrollThrottle, active_section,
    resolve_hash,
};
use crate::theme::{DEFAULT_THEME_KEY, ThemePersistence, ThemePreference};

/// Tunables for a [`DocsController`].
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerSettings {
    /// Anchor offset (pixels from the viewport top) below which a topic counts
    /// as reached by scroll-spy.
    pub scroll_threshold: f64,
    /// Minimum interval between scroll-spy evaluations.
    pub scroll_throttle: Duration,
    /// Storage key of the theme preference.
    pub theme_key: String,
    /// Copy feedback durations.
    pub copy: CopySettings,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            scroll_throttle: DEFAULT_SCROLL_THROTTLE,
            theme_key: DEFAULT_THEME_KEY.to_owned(),
            copy: CopySettings::default(),
        }
    }
}

/// Host event dispatched to [`DocsController::handle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocsEvent {
    /// A sidebar link was clicked.
    Navigate(String),
    /// The URL fragment changed outside the controller.
    HashChanged,
    /// The page scrolled.
    Scrolled,
    /// Periodic tick releasing a coalesced scroll evaluation.
    ScrollTick,
    /// The theme button was clicked.
    ToggleTheme,
}

/// Single-page documentation controller.
///
/// Exactly one topic is active at any time and the rendered sidebar and
/// content always agree with it after each handler returns.
pub struct DocsController {
    site: SiteContent,
    host: Host,
    theme: ThemePersistence,
    settings: ControllerSettings,
    throttle: ScrollThrottle,
    active: String,
}

impl DocsController {
    /// Create a controller on the site's default topic without touching the page.
    #[must_use]
    pub fn new(site: SiteContent, host: Host, settings: ControllerSettings) -> Self {
        let theme = ThemePersistence::new(Arc::clone(&host.store), settings.theme_key.clone());
        let throttle = ScrollThrottle::new(settings.scroll_throttle);
        let active = site.default_topic().to_owned();
        Self {
            site,
            host,
            theme,
            settings,
            throttle,
            active,
        }
    }

    /// Create a controller and bring the page to its initial state.
    ///
    /// Restores the theme, adopts a recognised location hash (the default
    /// topic otherwise) and renders both regions.
    #[must_use]
    pub fn start(site: SiteContent, host: Host, settings: ControllerSettings) -> Self {
        let mut controller = Self::new(site, host, settings);
        controller.restore_theme();

        let hash = controller.host.location.hash();
        if let Some(id) = resolve_hash(controller.site.topics(), &hash) {
            id.clone_into(&mut controller.active);
        } else if !hash.is_empty() {
            tracing::debug!(%hash, "Ignoring unknown startup hash");
        }

        tracing::debug!(topic = %controller.active, "Starting documentation controller");
        controller.render_sidebar();
        controller.render_content();
        controller
    }

    /// Currently active topic id.
    #[must_use]
    pub fn active_topic(&self) -> &str {
        &self.active
    }

    /// Loaded topics and content.
    #[must_use]
    pub fn site(&self) -> &SiteContent {
        &self.site
    }

    /// Capabilities this controller renders into.
    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Dispatch a host event. Returns `true` if the active topic or theme changed.
    pub fn handle(&mut self, event: DocsEvent, now: Instant) -> bool {
        match event {
            DocsEvent::Navigate(id) => self.navigate_to(&id),
            DocsEvent::HashChanged => self.handle_hash_change(),
            DocsEvent::Scrolled => self.handle_scroll(now),
            DocsEvent::ScrollTick => self.poll_scroll(now),
            DocsEvent::ToggleTheme => {
                self.toggle_theme();
                true
            }
        }
    }

    /// Activate a topic from a user click.
    ///
    /// Pushes `#id` to history, re-renders both regions and scrolls the content
    /// into view. Unknown ids are ignored and return `false`.
    pub fn navigate_to(&mut self, id: &str) -> bool {
        if !self.site.topics().contains(id) {
            tracing::debug!(topic = id, "Ignoring navigation to unknown topic");
            return false;
        }

        id.clone_into(&mut self.active);
        self.host.location.push_hash(id);
        self.render_sidebar();
        self.render_content();
        self.host.document.scroll_content_into_view();
        tracing::debug!(topic = id, "Navigated");
        true
    }

    /// Adopt the location hash after back/forward or a manual edit.
    ///
    /// Re-renders both regions without touching history. An unknown fragment
    /// is ignored and returns `false`.
    pub fn handle_hash_change(&mut self) -> bool {
        let hash = self.host.location.hash();
        let Some(id) = resolve_hash(self.site.topics(), &hash) else {
            tracing::debug!(%hash, "Ignoring unknown hash");
            return false;
        };

        id.clone_into(&mut self.active);
        self.render_sidebar();
        self.render_content();
        tracing::debug!(topic = %self.active, "Adopted location hash");
        true
    }

    /// Record a scroll event, running scroll-spy unless throttled.
    ///
    /// Throttled events leave a pending evaluation for [`poll_scroll`](Self::poll_scroll).
    pub fn handle_scroll(&mut self, now: Instant) -> bool {
        self.throttle.record(now) && self.update_scroll_spy()
    }

    /// Run a deferred scroll-spy evaluation once the throttle interval allows.
    pub fn poll_scroll(&mut self, now: Instant) -> bool {
        self.throttle.poll(now) && self.update_scroll_spy()
    }

    /// Whether a throttled scroll evaluation is still waiting.
    #[must_use]
    pub fn has_pending_scroll(&self) -> bool {
        self.throttle.has_pending()
    }

    /// Update the active topic from anchor positions.
    ///
    /// Only the sidebar is re-rendered: scrolling never pushes history, swaps
    /// content or scrolls. Returns `true` if the active topic changed.
    pub fn update_scroll_spy(&mut self) -> bool {
        let document = &self.host.document;
        let current = active_section(self.site.topics(), self.settings.scroll_threshold, |id| {
            document.anchor_top(id)
        });
        if current == self.active {
            return false;
        }

        tracing::debug!(from = %self.active, to = current, "Scroll-spy moved active topic");
        current.clone_into(&mut self.active);
        self.render_sidebar();
        true
    }

    /// Flip light/dark mode and persist the choice.
    pub fn toggle_theme(&self) -> ThemePreference {
        let preference = self.theme.toggle(self.host.document.as_ref());
        tracing::debug!(theme = %preference, "Toggled theme");
        preference
    }

    /// Apply the stored theme preference. Safe to call repeatedly.
    pub fn restore_theme(&self) -> ThemePreference {
        self.theme.restore(self.host.document.as_ref())
    }

    /// Replace the sidebar with one link per topic, marking the active one.
    pub fn render_sidebar(&self) {
        let links: Vec<NavLink<'_>> = self
            .site
            .topics()
            .iter()
            .map(|topic| NavLink {
                id: &topic.id,
                title: &topic.title,
                active: topic.id == self.active,
            })
            .collect();
        self.host.document.set_sidebar_html(&render_sidebar(&links));
        self.notify(Region::Sidebar);
    }

    /// Replace the content panel with the active topic's fragment.
    ///
    /// A topic without content shows the "not found" placeholder.
    pub fn render_content(&self) {
        let fragment = self.site.registry().get(&self.active);
        if fragment.is_none() {
            tracing::warn!(topic = %self.active, "No content for topic");
        }
        self.host.document.set_content_html(render_content(fragment));
        self.notify(Region::Content);
    }

    /// Copy a code block's escaped source through the page's feedback widgets.
    pub async fn copy_to_clipboard<C, T>(
        &self,
        clipboard: &C,
        timer: &T,
        control: &str,
        source_text: &str,
    ) -> CopyOutcome
    where
        C: Clipboard,
        T: Timer,
    {
        crate::clipboard::copy_to_clipboard(
            clipboard,
            timer,
            self.host.feedback.as_ref(),
            self.settings.copy,
            control,
            source_text,
        )
        .await
    }

    fn notify(&self, region: Region) {
        if let Some(listener) = &self.host.listener {
            listener.render_complete(region);
        }
    }
}
