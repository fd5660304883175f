//! Category data model extracted from the rendered index page.

use crate::utils::path::slug::slugify_path;
use indexmap::IndexMap;
use serde::Serialize;

/// One entry in a category's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Anchor text of the item's first link.
    pub title: String,
    /// Link target exactly as authored (relative or absolute).
    pub url: String,
    /// Full text of the list item; contains `title`.
    pub description: String,
}

/// One section of the source document, rendered as its own page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub title: String,
    /// Output directory name, derived from `title`.
    pub slug: String,
    pub description: String,
    /// Document order. Never empty.
    pub items: Vec<Link>,
}

impl Category {
    /// Build a category, or `None` when there are no items.
    pub fn new(title: String, description: String, items: Vec<Link>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            slug: slugify_path(&title),
            title,
            description,
            items,
        })
    }
}

/// Categories keyed by the table-of-contents `href` that discovered them.
///
/// Iteration follows discovery order, so page rendering and the sitemap are
/// reproducible between runs.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct CategoryRegistry {
    entries: IndexMap<String, Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under `href`. An existing key keeps its position and gets the
    /// new value.
    pub fn insert(&mut self, href: impl Into<String>, category: Category) {
        self.entries.insert(href.into(), category);
    }

    pub fn get(&self, href: &str) -> Option<&Category> {
        self.entries.get(href)
    }

    pub fn contains(&self, href: &str) -> bool {
        self.entries.contains_key(href)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.values()
    }

    /// Total number of links across all categories.
    pub fn link_count(&self) -> usize {
        self.entries.values().map(|c| c.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(title: &str) -> Link {
        Link {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            description: format!("{title} - a library"),
        }
    }

    #[test]
    fn test_category_requires_items() {
        assert!(Category::new("Misc".into(), "Other stuff.".into(), vec![]).is_none());
    }

    #[test]
    fn test_category_slug_from_title() {
        let category = Category::new("C/C++".into(), String::new(), vec![link("cgo")]).unwrap();
        assert_eq!(category.title, "C/C++");
        assert_eq!(category.slug, "cc");
    }

    #[test]
    fn test_registry_keeps_discovery_order() {
        let mut registry = CategoryRegistry::new();
        for title in ["Zebra", "Alpha", "Middle"] {
            let category = Category::new(title.into(), String::new(), vec![link("x")]).unwrap();
            registry.insert(format!("#{}", category.slug), category);
        }
        let slugs: Vec<_> = registry.categories().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, ["zebra", "alpha", "middle"]);
    }

    #[test]
    fn test_registry_reinsert_replaces_in_place() {
        let mut registry = CategoryRegistry::new();
        let first = Category::new("Go".into(), "v1".into(), vec![link("a")]).unwrap();
        let other = Category::new("Rust".into(), String::new(), vec![link("b")]).unwrap();
        let second = Category::new("Go".into(), "v2".into(), vec![link("a"), link("c")]).unwrap();

        registry.insert("#go", first);
        registry.insert("#rust", other);
        registry.insert("#go", second);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("#go").unwrap().description, "v2");
        assert_eq!(registry.iter().next().unwrap().0, "#go");
        assert_eq!(registry.link_count(), 3);
    }
}
