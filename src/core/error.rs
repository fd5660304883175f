//! Build error types.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a site build.
///
/// Missing document structure (an unmatched anchor, a section without a
/// list) is never an error; it only drops the affected category.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("IO error at `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse HTML: {0}")]
    Html(String),

    #[error("template `{name}` failed")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

impl BuildError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn template(name: impl Into<String>, source: minijinja::Error) -> Self {
        Self::Template {
            name: name.into(),
            source,
        }
    }
}
