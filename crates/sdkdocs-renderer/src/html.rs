//! Sidebar, content panel and page shell markup.

use std::fmt::Write;

use crate::escape::escape_html;

/// Fragment shown when a topic has no content.
pub const NOT_FOUND_HTML: &str = "<h1>Page not found</h1>";

/// Body class switched on for the dark theme.
pub const DARK_THEME_CLASS: &str = "alt-theme";

const PRISM_VERSION: &str = "1.29.0";

/// Sidebar entry for one topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink<'a> {
    /// Topic id, used as the hash fragment.
    pub id: &'a str,
    /// Display title.
    pub title: &'a str,
    /// Whether this is the active topic.
    pub active: bool,
}

/// Render sidebar links in the given order.
///
/// Each link points at `#<id>` and carries `data-topic` so hosts can route
/// clicks without inline handlers. Only active links get the `active` class.
#[must_use]
pub fn render_sidebar(links: &[NavLink<'_>]) -> String {
    let mut html = String::with_capacity(links.len() * 96);
    for link in links {
        let id = escape_html(link.id);
        let class = if link.active {
            "nav-item active"
        } else {
            "nav-item"
        };
        let _ = writeln!(
            html,
            "<a href=\"#{id}\" class=\"{class}\" data-topic=\"{id}\">{}</a>",
            escape_html(link.title)
        );
    }
    html
}

/// Content panel markup: the fragment itself, or [`NOT_FOUND_HTML`].
#[must_use]
pub fn render_content(fragment: Option<&str>) -> &str {
    fragment.unwrap_or(NOT_FOUND_HTML)
}

/// Data needed to render a complete page snapshot.
pub struct PageData<'a> {
    /// Site title.
    pub title: &'a str,
    /// Title of the active topic, appended to the document title.
    pub topic_title: Option<&'a str>,
    /// Current sidebar markup.
    pub sidebar_html: &'a str,
    /// Current content panel markup.
    pub content_html: &'a str,
    /// Whether the dark theme is applied.
    pub dark: bool,
    /// Glyph shown on the theme toggle.
    pub theme_icon: &'a str,
}

/// Render a complete HTML page around the sidebar and content regions.
///
/// Region ids match what a browser host addresses: `sidebarNav`,
/// `contentInner`, `themeToggle` and `toast`.
#[must_use]
pub fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(page.content_html.len() + 4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = match page.topic_title {
        Some(topic) => writeln!(
            html,
            "<title>{} - {}</title>",
            escape_html(topic),
            escape_html(page.title)
        ),
        None => writeln!(html, "<title>{}</title>", escape_html(page.title)),
    };
    let _ = writeln!(
        html,
        "<link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/prismjs@{PRISM_VERSION}/themes/prism-tomorrow.min.css\">"
    );
    html.push_str("<link rel=\"stylesheet\" href=\"styles.css\">\n");
    html.push_str("</head>\n");

    if page.dark {
        let _ = writeln!(html, "<body class=\"{DARK_THEME_CLASS}\">");
    } else {
        html.push_str("<body>\n");
    }

    html.push_str("<header class=\"topbar\">\n");
    let _ = writeln!(
        html,
        "<span class=\"brand\">{}</span>",
        escape_html(page.title)
    );
    let _ = writeln!(
        html,
        "<button type=\"button\" id=\"themeToggle\" class=\"theme-toggle\">{}</button>",
        page.theme_icon
    );
    html.push_str("</header>\n");

    html.push_str("<div class=\"layout\">\n");
    html.push_str("<aside class=\"sidebar\">\n<nav id=\"sidebarNav\">\n");
    html.push_str(page.sidebar_html);
    html.push_str("</nav>\n</aside>\n");
    html.push_str("<main class=\"content\">\n<div id=\"contentInner\">\n");
    html.push_str(page.content_html);
    html.push_str("\n</div>\n</main>\n</div>\n");

    html.push_str("<div id=\"toast\" class=\"toast\" role=\"status\"></div>\n");
    let _ = writeln!(
        html,
        "<script src=\"https://cdn.jsdelivr.net/npm/prismjs@{PRISM_VERSION}/prism.min.js\"></script>"
    );
    let _ = writeln!(
        html,
        "<script src=\"https://cdn.jsdelivr.net/npm/prismjs@{PRISM_VERSION}/plugins/autoloader/prism-autoloader.min.js\"></script>"
    );
    html.push_str("</body>\n</html>\n");
    html
}
