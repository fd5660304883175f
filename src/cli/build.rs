//! Site building orchestration.
//!
//! Build pipeline stages, run strictly in order:
//! - **Init** - Wipe and recreate the output directory, load templates
//! - **RenderIndex** - Markdown source to `index.html`
//! - **ExtractCategories** - Table of contents to category registry
//! - **RenderCategoryPages** - One `<slug>/index.html` per category
//! - **RewriteLinks** - Point nested contents entries at category pages
//! - **RenderSitemap** - `sitemap.xml` for the index and every category
//! - **CopyAssets** - Static files copied verbatim
//!
//! The first failing stage aborts the build; its error carries the stage name.

use crate::compiler::markdown::{MarkdownOptions, to_html};
use crate::compiler::template::{TemplateKind, Templates};
use crate::config::SiteConfig;
use crate::core::{BuildError, CategoryRegistry};
use crate::generator::sitemap::build_sitemap;
use crate::logger::plural_count;
use crate::page::{extract_categories, render_category_pages, rewrite_index_links};
use crate::utils::html::HtmlDocument;
use crate::utils::path::{copy_path, fs::write_file};
use crate::{debug, log};
use anyhow::{Context, Result};
use minijinja::{Value, context};
use std::fmt;
use std::fs;
use std::path::Path;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    RenderIndex,
    ExtractCategories,
    RenderCategoryPages,
    RewriteLinks,
    RenderSitemap,
    CopyAssets,
}

impl Stage {
    fn failed(self) -> String {
        format!("{self} stage failed")
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Init => "init",
            Self::RenderIndex => "render index",
            Self::ExtractCategories => "extract categories",
            Self::RenderCategoryPages => "render category pages",
            Self::RewriteLinks => "rewrite links",
            Self::RenderSitemap => "render sitemap",
            Self::CopyAssets => "copy assets",
        })
    }
}

/// Counts reported after a successful build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub categories: usize,
    pub links: usize,
    pub pages: usize,
    pub assets: usize,
}

/// Build the entire site.
///
/// Pipeline: init -> index -> extract -> pages -> links -> sitemap -> assets
pub fn build_site(config: &SiteConfig) -> Result<BuildSummary> {
    let templates = init_build(config).with_context(|| Stage::Init.failed())?;

    let index_html =
        render_index(config, &templates).with_context(|| Stage::RenderIndex.failed())?;

    let registry = HtmlDocument::parse(&index_html)
        .map(|doc| extract_categories(&doc, &config.build.index))
        .with_context(|| Stage::ExtractCategories.failed())?;
    log!(
        "build";
        "{} with {}",
        plural_count(registry.len(), "category"),
        plural_count(registry.link_count(), "link")
    );

    let pages = render_category_pages(&registry, &templates, config)
        .with_context(|| Stage::RenderCategoryPages.failed())?;
    log!("build"; "{}", plural_count(pages, "category page"));

    rewrite_links(config, &index_html, &registry).with_context(|| Stage::RewriteLinks.failed())?;

    build_sitemap(&registry, &templates, config).with_context(|| Stage::RenderSitemap.failed())?;

    let assets = copy_assets(config).with_context(|| Stage::CopyAssets.failed())?;

    Ok(BuildSummary {
        categories: registry.len(),
        links: registry.link_count(),
        pages,
        assets,
    })
}

/// Prepare a clean output directory and load templates.
fn init_build(config: &SiteConfig) -> Result<Templates, BuildError> {
    prepare_output(config.output_dir())?;
    debug!("build"; "output: {}", config.root_relative(config.output_dir()).display());
    Templates::load(config)
}

/// Remove `output` if it exists, then create it empty.
pub fn prepare_output(output: &Path) -> Result<(), BuildError> {
    if output.exists() {
        fs::remove_dir_all(output).map_err(|e| BuildError::io(output, e))?;
    }
    fs::create_dir_all(output).map_err(|e| BuildError::io(output, e))
}

/// Render the Markdown source into `<output>/index.html`. Returns the page.
fn render_index(config: &SiteConfig, templates: &Templates) -> Result<String, BuildError> {
    let source = &config.build.source;
    let markdown = fs::read_to_string(source).map_err(|e| BuildError::io(source, e))?;
    let body = to_html(&markdown, &MarkdownOptions::all());

    let html = templates.render(
        TemplateKind::Index,
        context! { body => Value::from_safe_string(body), site => &config.site },
    )?;

    let path = config.output_join("index.html");
    write_file(&path, &html)?;
    log!("build"; "{} -> {}", config.root_relative(source).display(), config.root_relative(&path).display());
    Ok(html)
}

/// Overwrite `<output>/index.html` with category links rewritten.
fn rewrite_links(
    config: &SiteConfig,
    index_html: &str,
    registry: &CategoryRegistry,
) -> Result<(), BuildError> {
    let rewritten = rewrite_index_links(index_html, registry, &config.build.index)?;
    write_file(&config.output_join("index.html"), rewritten)
}

/// Copy every configured asset. Returns the number of files copied.
fn copy_assets(config: &SiteConfig) -> Result<usize, BuildError> {
    let mut copied = 0;
    for asset in &config.build.assets {
        let dest = config.output_join(&asset.to);
        let count = copy_path(&asset.from, &dest)?;
        debug!(
            "assets";
            "{} -> {} ({})",
            config.root_relative(&asset.from).display(),
            config.root_relative(&dest).display(),
            plural_count(count, "file")
        );
        copied += count;
    }
    if copied > 0 {
        log!("assets"; "{}", plural_count(copied, "file"));
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_site_config;
    use tempfile::TempDir;

    const README: &str = "\
# Awesome Go

A curated list of awesome Go frameworks.

## Contents

- Categories
  - [Actor Model](#actor-model)
  - [C/C++](#cc)
  - [Empty](#empty)

## Actor Model

Libraries for building actor-based programs.

- [Ergo](https://github.com/ergo-services/ergo) - An actor-based Framework.
- [Goakt](https://github.com/Tochemey/goakt) - Actor framework.

## C/C++

- [cgo](https://pkg.go.dev/cmd/cgo) - Calls C code.

## Empty

Nothing yet.
";

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("README.md"), README).unwrap();
        fs::create_dir_all(root.join("tmpl/assets/css")).unwrap();
        fs::write(root.join("tmpl/assets/css/main.css"), "body{}").unwrap();
        fs::write(root.join("tmpl/robots.txt"), "User-agent: *\n").unwrap();
        fs::write(root.join("tmpl/_redirects"), "/old /new 301\n").unwrap();
        dir
    }

    #[test]
    fn test_build_site() {
        let dir = project();
        let config = test_site_config(dir.path(), "[site]\nurl = \"https://awesome-go.com\"\n");

        fs::create_dir_all(config.output_dir()).unwrap();
        fs::write(config.output_join("stale.html"), "old").unwrap();

        let summary = build_site(&config).unwrap();
        assert_eq!(
            summary,
            BuildSummary {
                categories: 2,
                links: 3,
                pages: 2,
                assets: 3,
            }
        );

        let out = config.output_dir();
        assert!(!out.join("stale.html").exists());
        assert!(out.join("actor-model/index.html").is_file());
        assert!(out.join("cc/index.html").is_file());
        assert!(!out.join("empty").exists());
        assert_eq!(fs::read_to_string(out.join("assets/css/main.css")).unwrap(), "body{}");
        assert!(out.join("robots.txt").is_file());
        assert!(out.join("_redirects").is_file());

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains(r#"<a href="actor-model">Actor Model</a>"#));
        assert!(index.contains(r#"<a href="cc">C/C++</a>"#));
        assert!(index.contains(r##"<a href="#empty">Empty</a>"##));
        assert!(index.contains(r#"<h2 id="actor-model">Actor Model</h2>"#));

        let page = fs::read_to_string(out.join("actor-model/index.html")).unwrap();
        assert!(page.contains("Libraries for building actor-based programs."));
        assert!(page.contains(r#"<a href="https://github.com/Tochemey/goakt">Goakt</a>"#));

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://awesome-go.com/actor-model/</loc>"));
        assert!(sitemap.contains("<loc>https://awesome-go.com/cc/</loc>"));
    }

    #[test]
    fn test_missing_source_fails_at_render_index() {
        let dir = TempDir::new().unwrap();
        let config = test_site_config(dir.path(), "");
        let err = build_site(&config).unwrap_err();
        assert_eq!(err.to_string(), "render index stage failed");
        assert!(format!("{err:#}").contains("README.md"));
    }

    #[test]
    fn test_missing_asset_fails_at_copy_assets() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), README).unwrap();
        let config = test_site_config(dir.path(), "");

        let err = build_site(&config).unwrap_err();
        assert_eq!(err.to_string(), "copy assets stage failed");
        // Everything before the failing stage was written
        assert!(config.output_join("sitemap.xml").is_file());
    }

    #[test]
    fn test_prepare_output() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("public");
        fs::create_dir_all(out.join("nested")).unwrap();
        fs::write(out.join("nested/file"), "x").unwrap();

        prepare_output(&out).unwrap();
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }
}
