//! `[site]` configuration.
//!
//! Serialized as-is into every template context as `site`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Site description, used for the index `<meta name="description">`.
    pub description: String,

    /// Absolute base URL for sitemap `<loc>`s and canonical links.
    /// Stored without a trailing slash.
    pub url: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: "Awesome List".into(),
            description: String::new(),
            url: "http://localhost".into(),
        }
    }
}

impl SiteInfoConfig {
    /// Strip trailing slashes so templates can write `{{ site.url }}/path`.
    pub fn normalize(&mut self) {
        let trimmed = self.url.trim().trim_end_matches('/');
        if trimmed.len() != self.url.len() {
            self.url = trimmed.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.url, "http://localhost");
        assert!(config.site.description.is_empty());
    }

    #[test]
    fn test_site_url_trailing_slash() {
        let mut config = test_parse_config("[site]\nurl = \"https://awesome-go.com/\"");
        config.site.normalize();
        assert_eq!(config.site.url, "https://awesome-go.com");
    }
}
