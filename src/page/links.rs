//! Index link rewriting.
//!
//! Table-of-contents entries nested under the content container point at
//! in-page fragments (`#actor-model`). Once a category page exists for a
//! fragment, the entry is pointed at the page directory instead
//! (`actor-model`). Only the `href` value of each matched anchor changes;
//! every other byte of the page is kept.

use crate::config::IndexConfig;
use crate::core::{BuildError, CategoryRegistry};
use crate::debug;
use crate::utils::html::{HtmlDocument, attr_value_span, escape_attr};
use crate::utils::path::route::fragment_id;
use std::ops::Range;

/// Fragment that always stays an in-page link.
const CONTENTS_FRAGMENT: &str = "contents";

/// A replacement for one byte range of the source.
struct Patch {
    range: Range<usize>,
    value: String,
}

/// Rewrite registered nested anchors in `html` to their category pages.
pub fn rewrite_index_links(
    html: &str,
    registry: &CategoryRegistry,
    index: &IndexConfig,
) -> Result<String, BuildError> {
    let doc = HtmlDocument::parse(html)?;
    let selector = format!("body #{} ul li ul li a", index.content_id);

    let mut patches = Vec::new();
    for anchor in doc.elements().filter(|el| el.matches_path(&selector)) {
        let Some(href) = anchor.attr("href") else {
            continue;
        };
        if !registry.contains(&href) {
            continue;
        }
        let Some(target) = rewrite_target(&href) else {
            continue;
        };

        let Some(tag) = anchor.start_tag_span() else {
            debug!("links"; "cannot locate start tag for `{}`", href);
            continue;
        };
        let Some(value) = attr_value_span(&html[tag.clone()], "href") else {
            continue;
        };

        patches.push(Patch {
            range: tag.start + value.start..tag.start + value.end,
            value: escape_attr(target).into_owned(),
        });
    }

    debug!("links"; "rewrote {} of {} categories", patches.len(), registry.len());
    Ok(apply_patches(html, patches))
}

/// New `href` for a registered entry, or `None` to leave it alone.
fn rewrite_target(href: &str) -> Option<&str> {
    fragment_id(href).filter(|f| *f != CONTENTS_FRAGMENT)
}

/// Splice non-overlapping patches into `source`.
fn apply_patches(source: &str, mut patches: Vec<Patch>) -> String {
    patches.sort_by_key(|p| p.range.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for patch in patches {
        out.push_str(&source[cursor..patch.range.start]);
        out.push_str(&patch.value);
        cursor = patch.range.end;
    }
    out.push_str(&source[cursor..]);
    out
}
