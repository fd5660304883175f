//! Category extraction from the rendered index page.
//!
//! The table of contents is the `ul` right after the `#contents` element.
//! Its top-level entries are group labels; every anchor inside a nested list
//! names a heading by fragment. The heading's following paragraph is the
//! category description and the first list before the next heading of the
//! same or higher rank holds its links.

use crate::config::IndexConfig;
use crate::core::{Category, CategoryRegistry, Link};
use crate::logger::plural_count;
use crate::{debug, log};
use crate::utils::html::{Element, HtmlDocument};

/// Level assigned to non-heading elements when looking for a section end.
const NON_HEADING_LEVEL: u8 = 6;

/// Build the category registry from a parsed index page.
///
/// Structure that does not follow the convention is skipped, never an error.
pub fn extract_categories(doc: &HtmlDocument<'_>, index: &IndexConfig) -> CategoryRegistry {
    let mut registry = CategoryRegistry::new();

    let Some(toc) = table_of_contents(doc, &index.contents_id) else {
        debug!("extract"; "no list after #{}, no categories", index.contents_id);
        return registry;
    };

    for anchor in category_anchors(toc) {
        let Some(href) = anchor.attr("href") else {
            continue;
        };

        match category_for(doc, &href) {
            Some(category) if category.slug.is_empty() => {
                log!("warning"; "`{}` has no usable slug, category skipped", category.title);
            }
            Some(category) => {
                debug!(
                    "extract";
                    "{} -> /{}/ ({})",
                    href,
                    category.slug,
                    plural_count(category.items.len(), "link")
                );
                registry.insert(href, category);
            }
            None => debug!("extract"; "skipping `{}`: no heading with a list", href),
        }
    }

    registry
}

fn table_of_contents<'d, 'a>(
    doc: &'d HtmlDocument<'a>,
    contents_id: &str,
) -> Option<Element<'d, 'a>> {
    doc.element_by_id(contents_id)?
        .next_element_sibling()
        .filter(|el| el.is("ul"))
}

/// Anchors inside the TOC's nested lists, in document order. Top-level
/// entries are skipped.
fn category_anchors<'d, 'a>(toc: Element<'d, 'a>) -> impl Iterator<Item = Element<'d, 'a>> {
    toc.find("a").into_iter().filter(move |anchor| {
        anchor
            .ancestors()
            .take_while(|el| *el != toc)
            .any(|el| el.is("ul"))
    })
}

fn category_for(doc: &HtmlDocument<'_>, href: &str) -> Option<Category> {
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    let heading = doc.element_by_id(id)?;

    let description = heading
        .next_element_sibling()
        .filter(|el| el.is("p"))
        .map(|p| p.text())
        .unwrap_or_default();

    let items = section_list(heading)?
        .find("li")
        .iter()
        .map(link_from_item)
        .collect();

    Category::new(heading.text(), description, items)
}

/// First `ul`/`ol` among the following siblings, stopping at the next
/// heading that does not nest under `heading`.
fn section_list<'d, 'a>(heading: Element<'d, 'a>) -> Option<Element<'d, 'a>> {
    let level = heading.heading_level().unwrap_or(NON_HEADING_LEVEL);
    heading
        .following_siblings()
        .take_while(|el| el.heading_level().is_none_or(|l| l > level))
        .find(|el| el.is("ul") || el.is("ol"))
}

fn link_from_item(item: &Element<'_, '_>) -> Link {
    let anchor = item.find("a").into_iter().next();
    Link {
        title: anchor.map(|a| a.text()).unwrap_or_default(),
        url: anchor.and_then(|a| a.attr("href")).unwrap_or_default(),
        description: item.text().trim().to_string(),
    }
}
