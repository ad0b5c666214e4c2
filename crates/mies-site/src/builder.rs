//! Static site builder.
//!
//! [`StaticSiteBuilder::build`] runs the whole pipeline:
//!
//! 1. discover markdown pages
//! 2. load each page (header + HTML conversion)
//! 3. move index pages to the end
//! 4. render each page through its template
//! 5. reset the output directory and copy raw files
//! 6. write each page
//!
//! The output directory is only touched once every page has rendered, so a
//! failing build leaves the previous output in place.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use mies_config::{DEFAULT_SITE_FILE, SiteConfig, ThemeConfig};

use crate::error::{BuildError, RenderError};
use crate::loader::load_page;
use crate::markdown::MarkdownConverter;
use crate::order::move_index_pages_to_end;
use crate::output::{copy_raw_tree, reset_output_dir, write_page};
use crate::page::PageResult;
use crate::scanner::discover;
use crate::template::TemplateRenderer;

/// Location of the site to build.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Site directory.
    pub site_dir: PathBuf,
    /// Site config file, usually `<site_dir>/site.yaml`.
    pub site_file: PathBuf,
}

impl BuildConfig {
    /// Config for `site_dir` with the site file `file_name` inside it.
    #[must_use]
    pub fn new(site_dir: impl Into<PathBuf>, file_name: &str) -> Self {
        let site_dir = site_dir.into();
        let site_file = site_dir.join(file_name);
        Self {
            site_dir,
            site_file,
        }
    }

    /// Config for `site_dir` with the default `site.yaml`.
    #[must_use]
    pub fn with_default_file(site_dir: impl Into<PathBuf>) -> Self {
        Self::new(site_dir, DEFAULT_SITE_FILE)
    }
}

/// Summary of a finished build.
#[derive(Debug)]
pub struct BuildReport {
    /// Number of pages processed.
    pub page_count: usize,
    /// Number of raw files copied into the output directory.
    pub raw_file_count: usize,
    /// Written pages, in processing order.
    pub written: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Builds a static site from markdown pages and a theme.
pub struct StaticSiteBuilder {
    site: SiteConfig,
    theme: ThemeConfig,
    converter: MarkdownConverter,
    renderer: TemplateRenderer,
}

impl StaticSiteBuilder {
    /// Load site and theme configuration.
    pub fn new(config: &BuildConfig) -> Result<Self, BuildError> {
        tracing::info!(site_dir = %config.site_dir.display(), "Initializing site");
        tracing::info!(site_file = %config.site_file.display(), "Loading site file");

        let site = SiteConfig::load(&config.site_dir, &config.site_file)?;
        let theme = ThemeConfig::load(&site.theme_file_path(&config.site_dir))?;

        let template_dirs = site
            .templates_path()
            .into_iter()
            .chain([theme.templates_path()])
            .collect();

        Ok(Self {
            site,
            theme,
            converter: MarkdownConverter::new(),
            renderer: TemplateRenderer::new(template_dirs),
        })
    }

    #[must_use]
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    /// Build the site, processing at most `max` pages.
    pub async fn build(&mut self, max: usize) -> Result<BuildReport, BuildError> {
        let start = Instant::now();
        let pages_dir = self.site.pages_path();
        let outputs_dir = self.site.outputs_path();

        tracing::debug!(path = %self.theme.config_path.display(), "Theme");
        tracing::debug!(path = %pages_dir.display(), "Input directory");
        tracing::debug!(path = %outputs_dir.display(), "Output directory");

        let mut pages = discover(&pages_dir, &outputs_dir, max)?;

        tracing::info!("Loading {} markdown pages...", pages.len());
        for page in &mut pages {
            load_page(page, &self.converter).map_err(|source| BuildError::PageLoad {
                file: page.in_path.clone(),
                source,
            })?;
        }
        move_index_pages_to_end(&mut pages);

        tracing::info!("Converting pages to HTML...");
        for index in 0..pages.len() {
            let html = self.render_page(&pages, index).await?;
            pages[index].html_output = Some(html);
        }

        tracing::info!("Preparing the output directory...");
        reset_output_dir(&outputs_dir)?;
        let raw_file_count = self.copy_raw_files(&outputs_dir)?;

        tracing::info!("Writing HTML pages to disk...");
        let written = write_pages(&pages)?;

        let report = BuildReport {
            page_count: pages.len(),
            raw_file_count,
            written,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            page_count = report.page_count,
            elapsed_ms = report.elapsed.as_millis(),
            "Done. Processed {} pages.",
            report.page_count
        );
        Ok(report)
    }

    async fn render_page(
        &mut self,
        pages: &[PageResult],
        index: usize,
    ) -> Result<String, BuildError> {
        let page = &pages[index];
        tracing::debug!(page = %page.name(), output = %page.out_name(), "Rendering page");

        let wrap = |source| BuildError::Render {
            file: page.in_path.clone(),
            source,
        };
        let model = page.model.as_ref().ok_or(RenderError::MissingModel).map_err(wrap)?;
        self.renderer
            .render(model, &self.site, pages)
            .await
            .map_err(wrap)
    }

    /// Copy the theme's raw files, then the site's own raw files if configured.
    ///
    /// A configured site raw files directory that does not exist is skipped.
    fn copy_raw_files(&self, outputs_dir: &Path) -> Result<usize, BuildError> {
        let theme_raw = self.theme.raw_files_path();
        let mut count = copy_raw_dir(&theme_raw, outputs_dir)?;

        if let Some(site_raw) = self.site.raw_files_path() {
            if site_raw.is_dir() {
                count += copy_raw_dir(&site_raw, outputs_dir)?;
            } else {
                tracing::debug!(
                    path = %site_raw.display(),
                    "Site raw files directory not found, skipping"
                );
            }
        }
        Ok(count)
    }
}

fn copy_raw_dir(raw_dir: &Path, outputs_dir: &Path) -> Result<usize, BuildError> {
    let copied = copy_raw_tree(raw_dir, outputs_dir)?;
    tracing::debug!(
        count = copied,
        path = %raw_dir.display(),
        "Copied files from raw files directory"
    );
    Ok(copied)
}

/// Write every rendered page, returning the written paths in order.
fn write_pages(pages: &[PageResult]) -> Result<Vec<PathBuf>, BuildError> {
    let mut written = Vec::with_capacity(pages.len());
    for page in pages {
        let Some(html) = &page.html_output else {
            return Err(BuildError::Render {
                file: page.in_path.clone(),
                source: RenderError::MissingOutput,
            });
        };
        write_page(&page.out_path, html)?;
        written.push(page.out_path.clone());
    }
    Ok(written)
}
