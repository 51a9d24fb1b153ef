//! Markdown body rendering.
//!
//! Bodies are rendered with pulldown-cmark using the GitHub-flavored
//! subset recipes are written in. The event stream is rewritten before
//! HTML output so that every heading carries a stable anchor id and
//! `mermaid` fences are emitted as client-side diagrams.

pub mod layout;
pub mod page;

use std::collections::HashSet;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::escape::{escape_html, slugify};

pub use page::render_recipe_page;

/// Words per minute used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Fence language rendered as a client-side diagram.
pub const MERMAID: &str = "mermaid";

/// A heading found in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Plain heading text.
    pub text: String,
    /// Anchor id emitted on the heading element.
    pub id: String,
}

/// A code block found in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Fence language, `None` for untagged fences and indented blocks.
    pub language: Option<String>,
    /// Number of source lines.
    pub lines: usize,
}

/// Result of rendering a recipe body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBody {
    /// Rendered HTML fragment.
    pub html: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// Code blocks in document order.
    pub code_blocks: Vec<CodeBlock>,
}

impl RenderedBody {
    /// Returns `true` if the body contains a diagram.
    #[must_use]
    pub fn has_mermaid(&self) -> bool {
        self.code_blocks
            .iter()
            .any(|b| b.language.as_deref().is_some_and(is_mermaid))
    }
}

/// Parser options for recipe bodies.
#[must_use]
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render a Markdown body to HTML.
///
/// Pure and deterministic: the same input always yields byte-identical
/// output. Raw HTML in the body passes through unchanged.
#[must_use]
pub fn render_markdown(body: &str) -> RenderedBody {
    let events: Vec<Event<'_>> = Parser::new_ext(body, markdown_options()).collect();
    let mut ids = HeadingIds::reserving(&events);
    let mut events = events.into_iter();
    let mut out: Vec<Event<'_>> = Vec::new();
    let mut headings = Vec::new();
    let mut code_blocks = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let inner = take_inner(&mut events, |e| {
                    matches!(e, Event::End(TagEnd::Heading(_)))
                });
                let text = plain_text(&inner);
                let id = ids.assign(id.as_deref(), &text);

                headings.push(Heading {
                    level: heading_level(level),
                    text,
                    id: id.clone(),
                });
                out.push(Event::Start(Tag::Heading {
                    level,
                    id: Some(CowStr::from(id)),
                    classes,
                    attrs,
                }));
                out.extend(inner);
                out.push(Event::End(TagEnd::Heading(level)));
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                let inner = take_inner(&mut events, |e| matches!(e, Event::End(TagEnd::CodeBlock)));
                let source: String = inner
                    .iter()
                    .filter_map(|e| match e {
                        Event::Text(t) => Some(t.as_ref()),
                        _ => None,
                    })
                    .collect();
                let language = match &kind {
                    CodeBlockKind::Fenced(info) => fence_language(info),
                    CodeBlockKind::Indented => None,
                };
                code_blocks.push(CodeBlock {
                    language: language.clone(),
                    lines: source.lines().count(),
                });

                match (kind, language) {
                    (_, Some(lang)) if is_mermaid(&lang) => {
                        out.push(Event::Html(CowStr::from(format!(
                            "<pre class=\"mermaid\">{}</pre>\n",
                            escape_html(&source)
                        ))));
                    }
                    (kind, language) => {
                        let kind = match kind {
                            CodeBlockKind::Fenced(_) => {
                                CodeBlockKind::Fenced(CowStr::from(language.unwrap_or_default()))
                            }
                            CodeBlockKind::Indented => CodeBlockKind::Indented,
                        };
                        out.push(Event::Start(Tag::CodeBlock(kind)));
                        out.extend(inner);
                        out.push(Event::End(TagEnd::CodeBlock));
                    }
                }
            }
            other => out.push(other),
        }
    }

    let mut html = String::with_capacity(body.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, out.into_iter());

    RenderedBody {
        html,
        headings,
        code_blocks,
    }
}

/// Estimated reading time in minutes: one minute per 200 words, rounded
/// up, never less than one.
#[must_use]
pub fn reading_minutes(body: &str) -> u32 {
    let words = body.split_whitespace().count();
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE))
        .unwrap_or(u32::MAX)
        .max(1)
}

/// First word of a fence info string (` ```yaml title="x" ` gives `yaml`).
fn fence_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

fn is_mermaid(language: &str) -> bool {
    language.eq_ignore_ascii_case(MERMAID)
}

const fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Drain events up to (and excluding) the first one matching `is_end`.
fn take_inner<'a, I, F>(events: &mut I, is_end: F) -> Vec<Event<'a>>
where
    I: Iterator<Item = Event<'a>>,
    F: Fn(&Event<'a>) -> bool,
{
    let mut inner = Vec::new();
    for event in events.by_ref() {
        if is_end(&event) {
            break;
        }
        inner.push(event);
    }
    inner
}

fn plain_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

/// Allocates unique heading anchors within one document.
#[derive(Debug)]
struct HeadingIds {
    used: HashSet<String>,
    /// Explicit `{#id}` attributes anywhere in the document.
    reserved: HashSet<String>,
}

impl HeadingIds {
    fn reserving(events: &[Event<'_>]) -> Self {
        let reserved = events
            .iter()
            .filter_map(|e| match e {
                Event::Start(Tag::Heading { id: Some(id), .. }) if !id.is_empty() => {
                    Some(id.to_string())
                }
                _ => None,
            })
            .collect();
        Self {
            used: HashSet::new(),
            reserved,
        }
    }

    /// The first use of an explicit `{#id}` is kept as written. Generated
    /// ids never take a reserved explicit id. Any id already in use takes
    /// a `-1`, `-2`, ... suffix.
    fn assign(&mut self, explicit: Option<&str>, text: &str) -> String {
        let explicit = explicit.filter(|id| !id.is_empty());
        let base = match explicit {
            Some(id) => id.to_string(),
            None => match slugify(text) {
                s if s.is_empty() => "section".to_string(),
                s => s,
            },
        };

        let mut id = base.clone();
        let mut n = 1;
        while self.is_taken(&id, explicit) {
            id = format!("{base}-{n}");
            n += 1;
        }
        self.used.insert(id.clone());
        id
    }

    fn is_taken(&self, id: &str, explicit: Option<&str>) -> bool {
        self.used.contains(id) || (explicit != Some(id) && self.reserved.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_ids_and_duplicates() {
        let rendered = render_markdown("# Setup\n\n## Install\n\n## Install\n\n## Install\n");
        let ids: Vec<_> = rendered.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["setup", "install", "install-1", "install-2"]);
        assert!(rendered.html.contains(r#"<h2 id="install-1">Install</h2>"#));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let rendered = render_markdown("## Clean up {#teardown}\n");
        assert_eq!(rendered.headings[0].id, "teardown");
        assert_eq!(rendered.headings[0].text, "Clean up");
        assert!(rendered.html.contains(r#"id="teardown""#));
    }

    #[test]
    fn test_generated_id_avoids_explicit_id() {
        let rendered = render_markdown("## Install\n\n## Setup {#install}\n");
        let ids: Vec<_> = rendered.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["install-1", "install"]);
        assert!(rendered.html.contains(r#"<h2 id="install-1">Install</h2>"#));
        assert!(rendered.html.contains(r#"<h2 id="install">Setup</h2>"#));
    }

    #[test]
    fn test_repeated_explicit_id_is_suffixed() {
        let rendered = render_markdown("## One {#step}\n\n## Two {#step}\n\n## Step\n");
        let ids: Vec<_> = rendered.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["step", "step-1", "step-2"]);
    }

    #[test]
    fn test_heading_text_includes_code() {
        let rendered = render_markdown("### Run `kubectl apply`\n");
        assert_eq!(rendered.headings[0].level, 3);
        assert_eq!(rendered.headings[0].text, "Run kubectl apply");
        assert_eq!(rendered.headings[0].id, "run-kubectl-apply");
    }

    #[test]
    fn test_punctuation_only_heading() {
        let rendered = render_markdown("## ???\n");
        assert_eq!(rendered.headings[0].id, "section");
    }

    #[test]
    fn test_code_block_language_class() {
        let rendered = render_markdown("```yaml title=\"deploy.yaml\"\napiVersion: v1\nkind: Pod\n```\n");
        assert!(rendered.html.contains(r#"<pre><code class="language-yaml">"#));
        assert_eq!(
            rendered.code_blocks,
            vec![CodeBlock {
                language: Some("yaml".to_string()),
                lines: 2,
            }]
        );
    }

    #[test]
    fn test_untagged_and_indented_blocks() {
        let rendered = render_markdown("```\nplain\n```\n\n    indented\n");
        assert_eq!(rendered.code_blocks.len(), 2);
        assert!(rendered.code_blocks.iter().all(|b| b.language.is_none()));
        assert!(rendered.html.contains("<pre><code>plain"));
    }

    #[test]
    fn test_mermaid_fence() {
        let rendered = render_markdown("```mermaid\ngraph LR\n  A --> B\n```\n");
        assert!(rendered.html.contains("<pre class=\"mermaid\">graph LR\n  A --&gt; B\n</pre>"));
        assert!(!rendered.html.contains("language-mermaid"));
        assert!(rendered.has_mermaid());
    }

    #[test]
    fn test_gfm_extensions() {
        let body = "| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n\n~~old~~\n";
        let html = render_markdown(body).html;
        assert!(html.contains("<table>"));
        assert!(html.contains("checkbox"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render_markdown("<div class=\"note\">careful</div>\n").html;
        assert!(html.contains("<div class=\"note\">careful</div>"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let body = "# Title\n\n## Step\n\n```bash\nkubectl get pods\n```\n\n## Step\n\nText[^1].\n\n[^1]: Note.\n";
        let first = render_markdown(body);
        let second = render_markdown(body);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reading_minutes() {
        assert_eq!(reading_minutes(""), 1);
        assert_eq!(reading_minutes(&"word ".repeat(200)), 1);
        assert_eq!(reading_minutes(&"word ".repeat(201)), 2);
        assert_eq!(reading_minutes(&"word ".repeat(1000)), 5);
    }
}
