//! URL fragment handling for table-of-contents links.

/// Split a URL into path and fragment parts.
///
/// Returns `None` for the fragment when the URL has no `#`.
///
/// # Examples
/// ```ignore
/// assert_eq!(split_path_fragment("#actor-model"), ("", Some("actor-model")));
/// assert_eq!(split_path_fragment("/about#team"), ("/about", Some("team")));
/// assert_eq!(split_path_fragment("/about"), ("/about", None));
/// ```
#[inline]
pub fn split_path_fragment(url: &str) -> (&str, Option<&str>) {
    match url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (url, None),
    }
}

/// Element id targeted by an in-page link, if any.
///
/// Only non-empty fragments count: `"#"` and `"https://x"` target nothing.
#[inline]
pub fn fragment_id(url: &str) -> Option<&str> {
    split_path_fragment(url).1.filter(|f| !f.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_fragment() {
        assert_eq!(split_path_fragment("#actor-model"), ("", Some("actor-model")));
        assert_eq!(split_path_fragment("/about#team"), ("/about", Some("team")));
        assert_eq!(split_path_fragment("/about"), ("/about", None));
        assert_eq!(split_path_fragment("#"), ("", Some("")));
    }

    #[test]
    fn test_split_only_first_hash() {
        assert_eq!(split_path_fragment("#a#b"), ("", Some("a#b")));
    }

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#gorm"), Some("gorm"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("https://github.com/go-gorm/gorm"), None);
    }
}
