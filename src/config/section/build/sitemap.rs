//! Sitemap generation configuration.

use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Output path for the sitemap file, relative to the output directory.
    pub path: PathBuf,
    /// Sitemap template file, relative to `build.templates`.
    pub template: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            path: "sitemap.xml".into(),
            template: "sitemap-tmpl.xml".into(),
        }
    }
}

impl SitemapConfig {
    pub(super) fn validate(&self, errors: &mut Vec<String>) {
        let inside_output = !self.path.as_os_str().is_empty()
            && self
                .path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !inside_output {
            errors.push(format!(
                "`build.sitemap.path` must be a relative file path, got `{}`",
                self.path.display()
            ));
        }
    }
}
