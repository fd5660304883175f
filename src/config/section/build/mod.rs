//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "README.md"        # Markdown list (relative to site root)
//! output = "public"           # Output directory, wiped on every build
//! templates = "tmpl"          # Directory holding the page templates
//! minify = false              # Minify sitemap XML
//! assets = [                  # Copied verbatim into the output root
//!     { from = "tmpl/assets", to = "assets" },
//! ]
//!
//! [build.index]
//! contents_id = "contents"    # Element preceding the table of contents
//! content_id = "content"      # Container whose nested list links are rewritten
//! template = "tmpl.html"
//!
//! [build.category]
//! template = "cat-tmpl.html"
//!
//! [build.sitemap]
//! path = "sitemap.xml"
//! template = "sitemap-tmpl.xml"
//! ```

mod assets;
mod sitemap;

pub use assets::AssetCopy;
pub use sitemap::SitemapConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Markdown source file.
    pub source: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Template directory. Missing templates fall back to embedded defaults.
    pub templates: PathBuf,

    /// Minify generated XML.
    pub minify: bool,

    /// Static files and directories copied into the output.
    pub assets: Vec<AssetCopy>,

    pub index: IndexConfig,

    pub category: CategoryConfig,

    pub sitemap: SitemapConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            source: "README.md".into(),
            output: "public".into(),
            templates: "tmpl".into(),
            minify: false,
            assets: assets::default_assets(),
            index: IndexConfig::default(),
            category: CategoryConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    /// Resolve `source`, `output`, `templates` and asset sources against `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.source = resolve(root, &self.source);
        self.output = resolve(root, &self.output);
        self.templates = resolve(root, &self.templates);
        for asset in &mut self.assets {
            asset.from = resolve(root, &asset.from);
        }
    }

    /// Collect validation errors for this section.
    pub fn validate(&self, root: &Path, errors: &mut Vec<String>) {
        self.validate_output(root, errors);

        for (field, id) in [
            ("build.index.contents_id", &self.index.contents_id),
            ("build.index.content_id", &self.index.content_id),
        ] {
            if id.is_empty() || id.contains(char::is_whitespace) {
                errors.push(format!("`{field}` must be a single non-empty id"));
            }
        }

        for (idx, asset) in self.assets.iter().enumerate() {
            asset.validate(idx, errors);
        }
        self.sitemap.validate(errors);
    }

    /// `output` is wiped on every build, so it must not hold the project or
    /// any build input.
    fn validate_output(&self, root: &Path, errors: &mut Vec<String>) {
        if self.output.as_os_str().is_empty() {
            errors.push("`build.output` must not be empty".into());
            return;
        }
        if root.starts_with(&self.output) {
            errors.push(format!(
                "`build.output` must not be the project root `{}` or one of its parents, it is wiped on every build",
                root.display()
            ));
            return;
        }

        let inputs = [("build.source", &self.source), ("build.templates", &self.templates)]
            .into_iter()
            .chain(self.assets.iter().map(|asset| ("build.assets", &asset.from)));
        for (field, input) in inputs {
            if input.starts_with(&self.output) {
                errors.push(format!(
                    "`build.output` contains `{field}` (`{}`), it is wiped on every build",
                    input.display()
                ));
            }
        }
    }
}

/// Expand `~` and join relative paths onto `root`.
fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return PathBuf::new();
    }
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    crate::utils::path::normalize_path(&full_path)
}

/// `[build.index]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Id of the element whose next sibling list is the table of contents.
    pub contents_id: String,

    /// Id of the container holding the links to rewrite.
    pub content_id: String,

    /// Index template file, relative to `build.templates`.
    pub template: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            contents_id: "contents".into(),
            content_id: "content".into(),
            template: "tmpl.html".into(),
        }
    }
}

/// `[build.category]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Category page template file, relative to `build.templates`.
    pub template: PathBuf,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            template: "cat-tmpl.html".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        let build = &config.build;
        assert_eq!(build.source, PathBuf::from("README.md"));
        assert_eq!(build.output, PathBuf::from("public"));
        assert_eq!(build.templates, PathBuf::from("tmpl"));
        assert!(!build.minify);
        assert_eq!(build.index.contents_id, "contents");
        assert_eq!(build.index.content_id, "content");
        assert_eq!(build.index.template, PathBuf::from("tmpl.html"));
        assert_eq!(build.category.template, PathBuf::from("cat-tmpl.html"));
        assert_eq!(build.assets.len(), 3);
    }

    #[test]
    fn test_build_overrides() {
        let config = test_parse_config(
            r#"
[build]
source = "LIST.md"
output = "dist"
minify = true
assets = []

[build.index]
contents_id = "toc"
"#,
        );
        assert_eq!(config.build.source, PathBuf::from("LIST.md"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
        assert!(config.build.assets.is_empty());
        assert_eq!(config.build.index.contents_id, "toc");
        assert_eq!(config.build.index.content_id, "content");
    }

    #[test]
    fn test_normalize_resolves_against_root() {
        let mut build = BuildSectionConfig::default();
        let root = Path::new("/nonexistent/site");
        build.normalize(root);
        assert_eq!(build.source, root.join("README.md"));
        assert_eq!(build.output, root.join("public"));
        assert_eq!(build.assets[0].from, root.join("tmpl/assets"));
        assert_eq!(build.assets[0].to, PathBuf::from("assets"));
    }

    #[test]
    fn test_validate_output() {
        let root = Path::new("/nonexistent/site");
        let mut build = BuildSectionConfig::default();
        build.normalize(root);

        let mut errors = Vec::new();
        build.validate(root, &mut errors);
        assert!(errors.is_empty(), "{errors:?}");

        build.output = root.to_path_buf();
        build.validate(root, &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("project root"));
    }

    #[test]
    fn test_validate_output_above_root() {
        let root = Path::new("/nonexistent/site");
        let mut build = BuildSectionConfig {
            output: "..".into(),
            ..BuildSectionConfig::default()
        };
        build.normalize(root);
        assert_eq!(build.output, PathBuf::from("/nonexistent"));

        let mut errors = Vec::new();
        build.validate(root, &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("one of its parents"));
    }

    #[test]
    fn test_validate_output_over_inputs() {
        let root = Path::new("/nonexistent/site");
        let mut build = BuildSectionConfig {
            output: "tmpl".into(),
            ..BuildSectionConfig::default()
        };
        build.normalize(root);

        let mut errors = Vec::new();
        build.validate(root, &mut errors);
        assert!(errors.iter().any(|e| e.contains("`build.templates`")));
        assert!(errors.iter().any(|e| e.contains("`build.assets`")));
        assert!(!errors.iter().any(|e| e.contains("`build.source`")));

        let mut build = BuildSectionConfig {
            output: "docs".into(),
            source: "docs/README.md".into(),
            assets: Vec::new(),
            ..BuildSectionConfig::default()
        };
        build.normalize(root);
        let mut errors = Vec::new();
        build.validate(root, &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("`build.source`"));
    }

    #[test]
    fn test_validate_ids() {
        let mut build = BuildSectionConfig::default();
        build.index.content_id = "two words".into();
        let mut errors = Vec::new();
        build.validate(Path::new("/nonexistent"), &mut errors);
        assert!(errors.iter().any(|e| e.contains("build.index.content_id")));
    }
}
