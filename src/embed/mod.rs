//! Embedded default templates.
//!
//! Used when the site's template directory does not provide its own copy.
//!
//! # Module Structure
//!
//! - `build/index.html` - index page; receives `body` (safe HTML) and `site`
//! - `build/category.html` - one category page; receives `category` and `site`
//! - `build/sitemap.xml` - sitemap; receives `categories` and `site`

/// A template source compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedTemplate {
    /// Template name; its extension selects auto-escaping.
    pub name: &'static str,
    pub content: &'static str,
}

impl EmbeddedTemplate {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }
}

pub mod build {
    use super::EmbeddedTemplate;

    pub const INDEX_HTML: EmbeddedTemplate =
        EmbeddedTemplate::new("index.html", include_str!("build/index.html"));

    pub const CATEGORY_HTML: EmbeddedTemplate =
        EmbeddedTemplate::new("category.html", include_str!("build/category.html"));

    pub const SITEMAP_XML: EmbeddedTemplate =
        EmbeddedTemplate::new("sitemap.xml", include_str!("build/sitemap.xml"));
}
