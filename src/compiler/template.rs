//! Page and sitemap templates.
//!
//! Each [`TemplateKind`] reads its file from `build.templates`, falling back
//! to the embedded default when the file does not exist. Templates are
//! registered under the embedded name so auto-escaping always follows the
//! output format (`.html`, `.xml`) regardless of what the file on disk is
//! called.

use crate::config::SiteConfig;
use crate::core::BuildError;
use crate::debug;
use crate::embed::{EmbeddedTemplate, build};
use crate::utils::html::escape_attr;
use minijinja::{AutoEscape, Environment, Error, ErrorKind, Output, State, Value};
use serde::Serialize;
use std::{fs, io};

/// The templates a site build renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Context: `body` (safe HTML), `site`.
    Index,
    /// Context: `category`, `site`.
    Category,
    /// Context: `categories`, `site`.
    Sitemap,
}

impl TemplateKind {
    pub const ALL: [Self; 3] = [Self::Index, Self::Category, Self::Sitemap];

    fn embedded(self) -> EmbeddedTemplate {
        match self {
            Self::Index => build::INDEX_HTML,
            Self::Category => build::CATEGORY_HTML,
            Self::Sitemap => build::SITEMAP_XML,
        }
    }

    fn name(self) -> &'static str {
        self.embedded().name
    }
}

/// Loaded template environment.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load all templates for `config`.
    ///
    /// A missing file uses the embedded default; any other read error and any
    /// syntax error is returned.
    pub fn load(config: &SiteConfig) -> Result<Self, BuildError> {
        let mut env = Environment::new();
        env.set_formatter(attr_safe_formatter);

        for kind in TemplateKind::ALL {
            let file = match kind {
                TemplateKind::Index => &config.build.index.template,
                TemplateKind::Category => &config.build.category.template,
                TemplateKind::Sitemap => &config.build.sitemap.template,
            };
            let path = config.template_path(file);

            let source = match fs::read_to_string(&path) {
                Ok(source) => {
                    debug!("template"; "{} from {}", kind.name(), config.root_relative(&path).display());
                    source
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("template"; "{} not found, using embedded {}", config.root_relative(&path).display(), kind.name());
                    kind.embedded().content.to_string()
                }
                Err(e) => return Err(BuildError::io(&path, e)),
            };

            env.add_template_owned(kind.name(), source)
                .map_err(|e| BuildError::template(path.display().to_string(), e))?;
        }

        Ok(Self { env })
    }

    /// Templates built only from the embedded defaults.
    #[cfg(test)]
    pub fn embedded() -> Self {
        let mut env = Environment::new();
        env.set_formatter(attr_safe_formatter);
        for kind in TemplateKind::ALL {
            let embedded = kind.embedded();
            env.add_template(embedded.name, embedded.content).unwrap();
        }
        Self { env }
    }

    /// Render `kind` with a serializable context.
    pub fn render(&self, kind: TemplateKind, ctx: impl Serialize) -> Result<String, BuildError> {
        let fail = |e: Error| BuildError::template(kind.name(), e);
        let template = self.env.get_template(kind.name()).map_err(fail)?;
        template.render(ctx).map_err(fail)
    }
}

/// HTML auto-escaping that leaves `/` alone, so URLs in `href`s and sitemap
/// `<loc>`s come out readable.
fn attr_safe_formatter(out: &mut Output, state: &State, value: &Value) -> Result<(), Error> {
    if matches!(state.auto_escape(), AutoEscape::Html)
        && !value.is_safe()
        && let Some(s) = value.as_str()
    {
        return out
            .write_str(&escape_attr(s))
            .map_err(|e| Error::new(ErrorKind::WriteFailure, e.to_string()));
    }
    minijinja::escape_formatter(out, state, value)
}
