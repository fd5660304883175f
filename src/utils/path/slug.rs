//! URL slugification.
//!
//! Category slugs double as output directory names, so a slug must always be
//! a single path segment: directory separators are dropped *before*
//! transliteration rather than being turned into dashes.

use deunicode::deunicode;

/// Characters removed before slugification.
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// Separator used between words.
const SEPARATOR: char = '-';

/// Slugify a category title into a single path segment.
///
/// `"C/C++"` -> `"cc"`, `"Actor Model"` -> `"actor-model"`,
/// `"Café Tools"` -> `"cafe-tools"`.
pub fn slugify_path(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !PATH_SEPARATORS.contains(c)).collect();
    slugify(stripped.trim())
}

/// Slugify heading text into an anchor id.
///
/// Identical to [`slugify_path`] so that heading ids, table-of-contents
/// fragments and category directories agree for the same heading.
#[inline]
pub fn slugify_fragment(text: &str) -> String {
    slugify_path(text)
}

/// Transliterate to ASCII, lowercase, and collapse every run of
/// non-alphanumeric characters into a single separator.
fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_words() {
        assert_eq!(slugify_path("Go"), "go");
        assert_eq!(slugify_path("Actor Model"), "actor-model");
        assert_eq!(slugify_path("  Audio and Music  "), "audio-and-music");
    }

    #[test]
    fn test_separators_removed_before_slugify() {
        assert_eq!(slugify_path("C/C++"), "cc");
        assert_eq!(slugify_path("Forms / Validation"), "forms-validation");
        assert_eq!(slugify_path(r"Windows\Paths"), "windowspaths");
        assert!(!slugify_path("a/b/c").contains('/'));
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slugify_path("Bot Building!!"), "bot-building");
        assert_eq!(slugify_path("Go -- Generate"), "go-generate");
        assert_eq!(slugify_path("(Parentheses)"), "parentheses");
    }

    #[test]
    fn test_diacritics_normalized() {
        assert_eq!(slugify_path("Café Tools"), "cafe-tools");
        assert_eq!(slugify_path("Über Größe"), "uber-grosse");
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        for input in ["C/C++", "Actor Model", "Café Tools", "Go", "  x / y  "] {
            let once = slugify_path(input);
            assert_eq!(once, slugify_path(input));
            assert_eq!(slugify_path(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(slugify_path(""), "");
        assert_eq!(slugify_path("///"), "");
        assert_eq!(slugify_path("+++"), "");
    }

    #[test]
    fn test_fragment_matches_path() {
        assert_eq!(slugify_fragment("Actor Model"), slugify_path("Actor Model"));
    }
}
