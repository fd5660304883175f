//! Content generators for static site output.
//!
//! - **Sitemap**: search engine indexing (`sitemap.xml`), one entry for the
//!   index plus one per category page.

pub mod sitemap;

use std::borrow::Cow;

/// Minify XML content if enabled.
///
/// Joins trimmed, non-empty lines. Text that spans lines loses its line
/// breaks, which is fine for sitemap markup.
pub fn minify_xml(content: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(content);
    }
    Cow::Owned(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_xml_basic() {
        let xml = r#"<?xml version="1.0"?>
<root>
  <item>Hello</item>
</root>"#;
        assert_eq!(
            minify_xml(xml, true),
            r#"<?xml version="1.0"?><root><item>Hello</item></root>"#
        );
    }

    #[test]
    fn test_minify_xml_removes_empty_lines() {
        assert_eq!(minify_xml("<root>\n\n  <item/>\n\n</root>", true), "<root><item/></root>");
    }

    #[test]
    fn test_minify_xml_disabled() {
        let xml = "<root>\n  <item/>\n</root>";
        assert!(matches!(minify_xml(xml, false), Cow::Borrowed(s) if s == xml));
    }
}
