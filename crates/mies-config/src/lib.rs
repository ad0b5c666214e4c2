//! Configuration management for Mies.
//!
//! Two YAML files configure a build:
//!
//! - `site.yaml` ([`SiteConfig`]) at the site root: page, output and override
//!   directories, the theme file, and site metadata for templates.
//! - the theme file ([`ThemeConfig`]) referenced by `themefile`: the theme's
//!   templates and raw files directories.
//!
//! Field names are matched case-insensitively (`PagesDir`, `pagesdir` and
//! `PAGESDIR` are the same key). Directory names are relative to the file
//! that declares them, never to the process working directory.

use std::path::{Path, PathBuf};

use mies_header::HeaderError;
use serde::{Deserialize, Serialize};

/// Default site configuration filename.
pub const DEFAULT_SITE_FILE: &str = "site.yaml";

/// Site configuration read from `site.yaml`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Subdirectory containing `.md` page sources.
    #[serde(rename(deserialize = "pagesdir"))]
    pub pages_dir: String,
    /// Optional subdirectory with templates that take precedence over the theme's.
    #[serde(rename(deserialize = "templatesdir"), default)]
    pub templates_dir: Option<String>,
    /// Optional subdirectory copied verbatim after the theme's raw files.
    #[serde(rename(deserialize = "rawfilesdir"), default)]
    pub raw_files_dir: Option<String>,
    /// Output directory, destroyed and recreated on every build.
    #[serde(rename(deserialize = "outputsdir"))]
    pub outputs_dir: String,
    /// Theme config file, relative to the site directory.
    #[serde(rename(deserialize = "themefile"))]
    pub theme_file: String,

    #[serde(default = "default_generator")]
    pub generator: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// How many recent blog posts templates should feature.
    #[serde(rename(deserialize = "recentposts"), default)]
    pub recent_posts: usize,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_generator() -> String {
    "MIES".to_owned()
}

/// Theme configuration read from the file named by [`SiteConfig::theme_file`].
#[derive(Clone, Debug, Deserialize)]
pub struct ThemeConfig {
    #[serde(rename(deserialize = "templatesdir"))]
    pub templates_dir: String,
    #[serde(rename(deserialize = "rawfilesdir"))]
    pub raw_files_dir: String,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required directory does not exist.
    #[error("{label} not found: {}", path.display())]
    DirectoryNotFound { label: &'static str, path: PathBuf },

    /// A required file does not exist.
    #[error("{label} not found: {}", path.display())]
    FileNotFound { label: &'static str, path: PathBuf },

    /// I/O error while reading a config file.
    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid configuration record.
    #[error(transparent)]
    Header(#[from] HeaderError),
}

impl SiteConfig {
    /// Load site configuration from `config_file` inside `site_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DirectoryNotFound` / `ConfigError::FileNotFound`
    /// when either path is missing, and `ConfigError::Header` when the file
    /// cannot be decoded.
    pub fn load(site_dir: &Path, config_file: &Path) -> Result<Self, ConfigError> {
        require_dir(site_dir, "Site directory")?;
        require_file(config_file, "Site config file")?;

        let mut config: Self = decode_file(config_file)?;
        config.config_path = config_file.to_path_buf();
        Ok(config)
    }

    /// Directory containing the config file.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        parent_dir(&self.config_path)
    }

    /// Resolve `name` against the config file's directory.
    #[must_use]
    pub fn site_path(&self, name: &str) -> PathBuf {
        self.config_dir().join(name)
    }

    #[must_use]
    pub fn pages_path(&self) -> PathBuf {
        self.site_path(&self.pages_dir)
    }

    #[must_use]
    pub fn outputs_path(&self) -> PathBuf {
        self.site_path(&self.outputs_dir)
    }

    /// Site-level templates directory, if configured.
    #[must_use]
    pub fn templates_path(&self) -> Option<PathBuf> {
        self.templates_dir.as_deref().map(|dir| self.site_path(dir))
    }

    /// Site-level raw files directory, if configured.
    #[must_use]
    pub fn raw_files_path(&self) -> Option<PathBuf> {
        self.raw_files_dir.as_deref().map(|dir| self.site_path(dir))
    }

    /// Theme config file location: the site directory joined with `themefile`.
    #[must_use]
    pub fn theme_file_path(&self, site_dir: &Path) -> PathBuf {
        site_dir.join(&self.theme_file)
    }
}

impl ThemeConfig {
    /// Load theme configuration from `config_file`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` when the file is missing and
    /// `ConfigError::Header` when it cannot be decoded.
    pub fn load(config_file: &Path) -> Result<Self, ConfigError> {
        require_file(config_file, "Theme config file")?;

        let mut config: Self = decode_file(config_file)?;
        config.config_path = config_file.to_path_buf();
        Ok(config)
    }

    /// Directory containing the theme config file.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        parent_dir(&self.config_path)
    }

    /// Resolve `name` against the theme config file's directory.
    #[must_use]
    pub fn theme_path(&self, name: &str) -> PathBuf {
        self.config_dir().join(name)
    }

    #[must_use]
    pub fn templates_path(&self) -> PathBuf {
        self.theme_path(&self.templates_dir)
    }

    #[must_use]
    pub fn raw_files_path(&self) -> PathBuf {
        self.theme_path(&self.raw_files_dir)
    }
}

fn decode_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(mies_header::decode_header(path, &content)?)
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("."))
}

fn require_dir(path: &Path, label: &'static str) -> Result<(), ConfigError> {
    if path.is_dir() {
        return Ok(());
    }
    Err(ConfigError::DirectoryNotFound {
        label,
        path: path.to_path_buf(),
    })
}

fn require_file(path: &Path, label: &'static str) -> Result<(), ConfigError> {
    if path.is_file() {
        return Ok(());
    }
    Err(ConfigError::FileNotFound {
        label,
        path: path.to_path_buf(),
    })
}
