//! Sitemap generation.
//!
//! Renders the sitemap template with every category in registry order:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url><loc>https://awesome-go.com/</loc></url>
//!   <url><loc>https://awesome-go.com/actor-model/</loc></url>
//! </urlset>
//! ```

use crate::compiler::template::{TemplateKind, Templates};
use crate::config::SiteConfig;
use crate::core::{BuildError, Category, CategoryRegistry};
use crate::generator::minify_xml;
use crate::log;
use crate::utils::path::fs::write_file;
use minijinja::context;
use std::path::PathBuf;

/// Render and write the sitemap. Returns the written path.
pub fn build_sitemap(
    registry: &CategoryRegistry,
    templates: &Templates,
    config: &SiteConfig,
) -> Result<PathBuf, BuildError> {
    let categories: Vec<&Category> = registry.categories().collect();
    let xml = templates.render(
        TemplateKind::Sitemap,
        context! { categories => categories, site => &config.site },
    )?;
    let xml = minify_xml(&xml, config.build.minify);

    let path = config.output_join(&config.build.sitemap.path);
    write_file(&path, xml.as_bytes())?;

    log!("sitemap"; "{}", config.root_relative(&path).display());
    Ok(path)
}
