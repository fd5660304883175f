//! `[build] assets` entries.
//!
//! ```toml
//! [build]
//! assets = [
//!     { from = "tmpl/assets", to = "assets" },        # directory tree
//!     { from = "tmpl/robots.txt", to = "robots.txt" }, # single file
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};

/// One copy operation into the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCopy {
    /// File or directory, relative to the site root.
    pub from: PathBuf,
    /// Destination, relative to the output directory.
    pub to: PathBuf,
}

impl AssetCopy {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// `to` must stay inside the output directory.
    pub(super) fn validate(&self, idx: usize, errors: &mut Vec<String>) {
        let escapes = self.to.as_os_str().is_empty()
            || self
                .to
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            errors.push(format!(
                "`build.assets[{idx}].to` must be a relative path inside the output, got `{}`",
                self.to.display()
            ));
        }
    }
}

pub(super) fn default_assets() -> Vec<AssetCopy> {
    vec![
        AssetCopy::new("tmpl/assets", "assets"),
        AssetCopy::new("tmpl/robots.txt", "robots.txt"),
        AssetCopy::new("tmpl/_redirects", "_redirects"),
    ]
}
