//! Markdown to HTML conversion using pulldown-cmark.
//!
//! Headings without an explicit `{#id}` get one from [`slugify_fragment`],
//! so the table-of-contents fragments in the source (`#actor-model`) resolve
//! to real elements in the rendered page.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::utils::path::slug::slugify_fragment;

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Convert markdown to an HTML fragment.
pub fn to_html(markdown: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(markdown, options.to_pulldown_options());
    let events = with_heading_ids(parser);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Assign ids to headings that lack one.
///
/// Buffers each heading's events until its end tag, since the id depends on
/// the heading's full text.
fn with_heading_ids<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut heading: Option<(Tag<'a>, Vec<Event<'a>>)> = None;

    for event in events {
        if let Some((_, inner)) = heading.as_mut() {
            match event {
                Event::End(TagEnd::Heading(level)) => {
                    let Some((tag, inner)) = heading.take() else {
                        continue;
                    };
                    out.push(Event::Start(assign_id(tag, &inner)));
                    out.extend(inner);
                    out.push(Event::End(TagEnd::Heading(level)));
                }
                event => inner.push(event),
            }
            continue;
        }

        match event {
            Event::Start(tag @ Tag::Heading { .. }) => heading = Some((tag, Vec::new())),
            event => out.push(event),
        }
    }

    out
}

fn assign_id<'a>(tag: Tag<'a>, inner: &[Event<'a>]) -> Tag<'a> {
    match tag {
        Tag::Heading {
            level,
            id: None,
            classes,
            attrs,
        } => {
            let text: String = inner
                .iter()
                .filter_map(|e| match e {
                    Event::Text(t) | Event::Code(t) => Some(&**t),
                    _ => None,
                })
                .collect();
            let slug = slugify_fragment(&text);
            Tag::Heading {
                level,
                id: (!slug.is_empty()).then(|| CowStr::from(slug)),
                classes,
                attrs,
            }
        }
        tag => tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str) -> String {
        to_html(md, &MarkdownOptions::all())
    }

    #[test]
    fn test_heading_gets_slug_id() {
        assert_eq!(render("## Actor Model"), "<h2 id=\"actor-model\">Actor Model</h2>\n");
        assert_eq!(render("## C/C++"), "<h2 id=\"cc\">C/C++</h2>\n");
    }

    #[test]
    fn test_heading_with_inline_code() {
        assert!(render("## The `go` tool").contains("id=\"the-go-tool\""));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        assert!(render("## Contents {#toc}").contains("<h2 id=\"toc\">Contents</h2>"));
    }

    #[test]
    fn test_symbol_only_heading_has_no_id() {
        assert_eq!(render("## !!!"), "<h2>!!!</h2>\n");
    }

    #[test]
    fn test_toc_fragment_matches_heading_id() {
        let html = render("- [Actor Model](#actor-model)\n\n## Actor Model\n");
        assert!(html.contains("href=\"#actor-model\""));
        assert!(html.contains("<h2 id=\"actor-model\">"));
    }

    #[test]
    fn test_list_with_links() {
        let html = render("- [gorm](https://github.com/go-gorm/gorm) - ORM library.\n");
        assert!(html.contains("<li><a href=\"https://github.com/go-gorm/gorm\">gorm</a> - ORM library.</li>"));
    }
}
