//! HTML escaping for code samples and its exact inverse.

/// Entities produced by [`escape_html`], paired with the character they encode.
const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#039;", '\''),
];

/// Escape HTML special characters.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with `&amp;`, `&lt;`, `&gt;`, `&quot;`
/// and `&#039;`. Every input character is visited once, so an `&` produced by
/// one substitution is never re-escaped by another.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}

/// Reverse [`escape_html`].
///
/// Scans left to right and decodes each of the five entities where it starts,
/// so `&amp;lt;` becomes `&lt;` rather than `<`. Any other `&` sequence is
/// copied through unchanged.
///
/// # Examples
///
/// ```
/// use sdkdocs_renderer::{escape_html, unescape_html};
///
/// let source = "if (a && b) { el.innerHTML = '<b>&lt;</b>'; }";
/// assert_eq!(unescape_html(&escape_html(source)), source);
/// ```
#[must_use]
pub fn unescape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, c)) => {
                result.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#039;s");
    }

    #[test]
    fn test_escape_does_not_double_escape_own_output() {
        assert_eq!(escape_html("<&>"), "&lt;&amp;&gt;");
    }

    #[test]
    fn test_unescape_html() {
        assert_eq!(unescape_html("&lt;script&gt;"), "<script>");
        assert_eq!(unescape_html("a &amp; b"), "a & b");
        assert_eq!(unescape_html("&quot;x&quot;"), "\"x\"");
        assert_eq!(unescape_html("it&#039;s"), "it's");
    }

    #[test]
    fn test_unescape_keeps_escaped_entities_literal() {
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
        assert_eq!(unescape_html("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_unescape_passes_unknown_ampersands() {
        assert_eq!(unescape_html("AT&T &nbsp; &"), "AT&T &nbsp; &");
    }

    #[test]
    fn test_round_trip_tricky_inputs() {
        let inputs = [
            "",
            "plain",
            "&lt;already escaped&gt;",
            "&#039;&quot;&amp;",
            "<a href=\"x\">it's</a>",
            "&&&<<<>>>",
            "ünïcødé → 🚀 & <ok>",
            "&#039",
        ];
        for input in inputs {
            assert_eq!(unescape_html(&escape_html(input)), input, "input: {input:?}");
        }
    }
}
