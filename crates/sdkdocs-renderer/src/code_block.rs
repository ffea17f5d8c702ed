//! Code sample markup with a copy control.

use std::collections::HashMap;
use std::fmt::Write;

use crate::escape::{escape_html, unescape_html};

/// Language used when a sample does not name one.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Header label used when a sample does not name one.
pub const DEFAULT_LABEL: &str = "code";

/// Resting label of every copy control.
pub const COPY_LABEL: &str = "📋 Copy";

/// Attribute carrying the escaped source a copy control places on the clipboard.
const COPY_SOURCE_ATTR: &str = "data-copy-source";

/// Render a code sample with a labelled header and a copy control.
///
/// The code is escaped once with [`escape_html`]. The copy control is bound
/// to that escaped text: its `data-copy-source` attribute holds it (escaped
/// again for attribute context, so reading the attribute back yields the
/// escaped text), and the clipboard utility decodes it before writing.
///
/// # Examples
///
/// ```
/// use sdkdocs_renderer::code_block;
///
/// let html = code_block("<script>alert(1)</script>", "html", "x");
/// assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
/// assert!(!html.contains("<script>"));
/// ```
#[must_use]
pub fn code_block(code: &str, language: &str, label: &str) -> String {
    let escaped = escape_html(code);
    let mut out = String::with_capacity(escaped.len() * 2 + 256);

    out.push_str("<div class=\"code-block-wrapper\">\n");
    out.push_str("<div class=\"code-block-header\">\n");
    let _ = writeln!(
        out,
        "<span class=\"code-block-label\">{}</span>",
        escape_html(label)
    );
    let _ = writeln!(
        out,
        "<button type=\"button\" class=\"copy-btn\" {COPY_SOURCE_ATTR}=\"{}\">{COPY_LABEL}</button>",
        escape_html(&escaped)
    );
    out.push_str("</div>\n");
    let _ = writeln!(
        out,
        "<pre><code class=\"language-{}\">{escaped}</code></pre>",
        escape_html(language)
    );
    out.push_str("</div>\n");
    out
}

/// Collect the copy sources of every code block in a fragment, in document order.
///
/// Each entry is the escaped text the copy control is bound to, i.e. what a
/// browser would read from the `data-copy-source` attribute.
#[must_use]
pub fn copy_sources(html: &str) -> Vec<String> {
    let needle = format!("{COPY_SOURCE_ATTR}=\"");
    let mut sources = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(&needle) {
        rest = &rest[start + needle.len()..];
        let Some(end) = rest.find('"') else {
            break;
        };
        sources.push(unescape_html(&rest[..end]));
        rest = &rest[end..];
    }
    sources
}

/// Parse fence info string into language and attributes.
///
/// Format: `language [key=value ...]`
#[must_use]
pub(crate) fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let mut attrs = HashMap::new();
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            // Strip quotes if present
            let value = value.trim_matches('"').trim_matches('\'');
            attrs.insert(key.to_owned(), value.to_owned());
        }
    }

    (language, attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_block_markup() {
        let html = code_block("npm install azizbekid", "bash", "install.sh");
        assert_eq!(
            html,
            "<div class=\"code-block-wrapper\">\n\
             <div class=\"code-block-header\">\n\
             <span class=\"code-block-label\">install.sh</span>\n\
             <button type=\"button\" class=\"copy-btn\" data-copy-source=\"npm install azizbekid\">📋 Copy</button>\n\
             </div>\n\
             <pre><code class=\"language-bash\">npm install azizbekid</code></pre>\n\
             </div>\n"
        );
    }

    #[test]
    fn test_code_block_escapes_script_tag() {
        let html = code_block("<script>alert(1)</script>", "html", "x");
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("</script>"));
    }

    #[test]
    fn test_copy_source_is_escaped_text() {
        let html = code_block("a < b && c", "javascript", "cmp.js");
        assert_eq!(copy_sources(&html), vec!["a &lt; b &amp;&amp; c".to_owned()]);
    }

    #[test]
    fn test_copy_sources_in_document_order() {
        let html = format!(
            "<p>intro</p>{}{}",
            code_block("first()", "javascript", "a.js"),
            code_block("echo 'second'", "bash", "b.sh")
        );
        assert_eq!(
            copy_sources(&html),
            vec!["first()".to_owned(), "echo &#039;second&#039;".to_owned()]
        );
    }

    #[test]
    fn test_label_is_escaped() {
        let html = code_block("x", "javascript", "<b>label</b>");
        assert!(html.contains("&lt;b&gt;label&lt;/b&gt;"));
    }

    #[test]
    fn test_parse_fence_info_language_only() {
        let (lang, attrs) = parse_fence_info("html");
        assert_eq!(lang, "html");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_with_label() {
        let (lang, attrs) = parse_fence_info("javascript label=\"esm-import.js\"");
        assert_eq!(lang, "javascript");
        assert_eq!(attrs.get("label"), Some(&"esm-import.js".to_owned()));
    }
}
