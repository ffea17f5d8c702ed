//! HTML markup for the sdkdocs documentation page.
//!
//! Everything here is pure: functions take data and return markup strings.
//!
//! - [`code_block`]: escaped code sample with a labelled header and copy control
//! - [`escape_html`] / [`unescape_html`]: the escaping the copy control relies on
//! - [`render_markdown`]: markdown page to content fragment
//! - [`render_sidebar`], [`render_content`], [`render_page`]: page regions
//!
//! # Example
//!
//! ```
//! use sdkdocs_renderer::{NavLink, render_sidebar};
//!
//! let html = render_sidebar(&[NavLink { id: "faq", title: "FAQ", active: true }]);
//! assert!(html.contains("nav-item active"));
//! ```

mod code_block;
mod escape;
mod html;
mod markdown;

pub use code_block::{COPY_LABEL, DEFAULT_LABEL, DEFAULT_LANGUAGE, code_block, copy_sources};
pub use escape::{escape_html, unescape_html};
pub use html::{
    DARK_THEME_CLASS, NOT_FOUND_HTML, NavLink, PageData, render_content, render_page,
    render_sidebar,
};
pub use markdown::render_markdown;
