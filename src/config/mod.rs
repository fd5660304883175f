//! Site configuration management.
//!
//! Handles loading and validating `site.toml`. The file is optional: without
//! one, every field takes its default and the current directory becomes the
//! project root.
//!
//! # Sections
//!
//! | Section           | Purpose                                       |
//! |-------------------|-----------------------------------------------|
//! | `[site]`          | Title, description, base URL                  |
//! | `[build]`         | Source, output, templates, minify, assets     |
//! | `[build.index]`   | Table-of-contents and content container ids   |
//! | `[build.category]`| Category page template                        |
//! | `[build.sitemap]` | Sitemap output path and template              |

mod error;
mod section;
mod util;

pub use error::ConfigError;
pub use section::IndexConfig;

use crate::cli::Cli;
use crate::utils::path::normalize_path;
use crate::{debug, log};
use anyhow::{Context, Result};
use section::{BuildSectionConfig, SiteInfoConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use util::{find_config_file, validate_site_url};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `site.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Config file that was loaded, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    pub site: SiteInfoConfig,

    /// Build settings
    pub build: BuildSectionConfig,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation, searching upward from cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(&cwd, &cli.config)
    }

    /// Load configuration as if run from `cwd`.
    ///
    /// The project root is the config file's directory, or `cwd` when no
    /// config file exists.
    pub fn load_from(cwd: &Path, config_name: &Path) -> Result<Self> {
        let mut config = match find_config_file(cwd, config_name) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", config_name.display());
                Self::default()
            }
        };

        let root = config
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
        config.finalize(&root);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Resolve every path against `root`.
    fn finalize(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.site.normalize();
        self.build.normalize(&root);
        self.root = root;
    }

    /// Validate the finalized configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = validate_site_url(&self.site.url) {
            errors.push(e);
        }
        self.build.validate(&self.root, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    // ========================================================================
    // paths
    // ========================================================================

    /// Output root directory.
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    /// Join a path onto the output directory.
    pub fn output_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.build.output.join(path)
    }

    /// Full path of a template file under `build.templates`.
    pub fn template_path(&self, file: &Path) -> PathBuf {
        self.build.templates.join(file)
    }

    /// Get path relative to the site root, for log output.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content without finalizing paths.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Parse config content and resolve its paths against `root`.
#[cfg(test)]
pub fn test_site_config(root: &Path, content: &str) -> SiteConfig {
    let mut config = test_parse_config(content);
    config.finalize(root);
    config
}

// ============================================================================
// tests
// ============================================================================
