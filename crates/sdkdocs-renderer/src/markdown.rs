//! Markdown pages to content fragments.
//!
//! Pages are CommonMark with GFM extensions. Fenced code blocks are routed
//! through [`code_block`] so every sample gets a header and copy control;
//! everything else, raw HTML included, goes through pulldown-cmark's HTML
//! writer unchanged.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::code_block::{DEFAULT_LABEL, DEFAULT_LANGUAGE, code_block, parse_fence_info};

/// Fenced code block being collected.
struct PendingCode {
    language: String,
    label: String,
    source: String,
}

/// Parser options used for every page.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Render a markdown page into a content fragment.
///
/// The fence info string selects language and label:
/// ```text
/// ```html label=cdn-setup.html
/// ```
/// Missing values fall back to [`DEFAULT_LANGUAGE`] and [`DEFAULT_LABEL`].
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut pending: Option<PendingCode> = None;

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let (language, mut attrs) = match kind {
                    CodeBlockKind::Fenced(info) => parse_fence_info(&info),
                    CodeBlockKind::Indented => Default::default(),
                };
                pending = Some(PendingCode {
                    language: if language.is_empty() {
                        DEFAULT_LANGUAGE.to_owned()
                    } else {
                        language
                    },
                    label: attrs
                        .remove("label")
                        .unwrap_or_else(|| DEFAULT_LABEL.to_owned()),
                    source: String::new(),
                });
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(code) = pending.take() {
                    let source = code.source.strip_suffix('\n').unwrap_or(&code.source);
                    let markup = code_block(source, &code.language, &code.label);
                    events.push(Event::Html(CowStr::from(markup)));
                }
            }
            Event::Text(text) if pending.is_some() => {
                if let Some(code) = pending.as_mut() {
                    code.source.push_str(&text);
                }
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, events.into_iter());
    out
}
