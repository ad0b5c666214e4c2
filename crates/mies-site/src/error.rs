//! Build error types.

use std::path::{Path, PathBuf};

use mies_config::ConfigError;
use mies_header::HeaderError;

/// Error returned by the static site builder.
///
/// Every variant names the file it concerns; the underlying cause is
/// available through [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Error while loading page {}", file.display())]
    PageLoad {
        file: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("Error while rendering HTML for page {}", file.display())]
    Render {
        file: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("I/O error: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error returned while loading a single page.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Header(#[from] HeaderError),
}

/// Error returned while rendering a single page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No templates directory contains the template.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("Failed to read template {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The page reached rendering without being loaded.
    #[error("Page has not been loaded")]
    MissingModel,

    /// The page reached writing without rendered HTML.
    #[error("Page has not been rendered")]
    MissingOutput,
}

/// Wrap an I/O error with the path it occurred on.
pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError + '_ {
    move |source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}
