//! Category page rendering.

use crate::compiler::template::{TemplateKind, Templates};
use crate::config::SiteConfig;
use crate::core::{BuildError, Category, CategoryRegistry};
use crate::utils::path::fs::write_file;
use crate::debug;
use minijinja::context;
use std::fs;
use std::path::PathBuf;

/// Render one category to `<output>/<slug>/index.html`.
///
/// An existing page at that path is overwritten.
pub fn render_category_page(
    category: &Category,
    templates: &Templates,
    config: &SiteConfig,
) -> Result<PathBuf, BuildError> {
    let dir = config.output_join(&category.slug);
    fs::create_dir_all(&dir).map_err(|e| BuildError::io(&dir, e))?;

    let html = templates.render(
        TemplateKind::Category,
        context! { category => category, site => &config.site },
    )?;

    let path = dir.join("index.html");
    write_file(&path, html)?;
    Ok(path)
}

/// Render every category in registry order. Returns the number of pages
/// written.
///
/// Categories sharing a slug overwrite each other; the last one wins.
pub fn render_category_pages(
    registry: &CategoryRegistry,
    templates: &Templates,
    config: &SiteConfig,
) -> Result<usize, BuildError> {
    let mut written = 0;

    for (href, category) in registry.iter() {
        let existed = config.output_join(&category.slug).join("index.html").exists();
        let path = render_category_page(category, templates, config)?;
        if existed {
            debug!("render"; "{} overwritten by {}", config.root_relative(&path).display(), href);
        }
        written += 1;
    }

    Ok(written)
}
