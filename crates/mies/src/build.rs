//! Site build command.

use std::path::PathBuf;

use clap::Args;
use mies_config::DEFAULT_SITE_FILE;
use mies_site::{BuildConfig, StaticSiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for building a site.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Site directory containing the site config file.
    #[arg(value_name = "DIR")]
    pub site_dir: Option<PathBuf>,

    /// Name of the site config file inside the site directory.
    #[arg(long = "sitefile", value_name = "NAME", default_value = DEFAULT_SITE_FILE)]
    pub site_file: String,

    /// Enable verbose output (debug logging and full error causes).
    #[arg(short, long)]
    pub verbose: bool,

    /// Maximum number of pages to process.
    #[arg(long, value_name = "N", default_value_t = usize::MAX, hide_default_value = true)]
    pub max: usize,
}

impl BuildArgs {
    /// Build the site in `site_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or any build stage fails.
    pub(crate) async fn execute(&self, site_dir: PathBuf) -> Result<(), CliError> {
        let output = Output::new();

        let config = BuildConfig::new(site_dir, &self.site_file);
        output.field("Site", config.site_file.display());

        let mut builder = StaticSiteBuilder::new(&config)?;
        output.field("Output", builder.site().outputs_path().display());

        let report = builder.build(self.max).await?;

        output.success(&format!(
            "Generated website in {:.3} seconds",
            report.elapsed.as_secs_f64()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mies_site::BuildError;
    use std::fs;

    fn args(max: usize) -> BuildArgs {
        BuildArgs {
            site_dir: None,
            site_file: DEFAULT_SITE_FILE.to_owned(),
            verbose: false,
            max,
        }
    }

    #[tokio::test]
    async fn test_execute_builds_site() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("pages")).unwrap();
        fs::create_dir_all(root.join("theme/templates")).unwrap();
        fs::create_dir_all(root.join("theme/raw")).unwrap();
        fs::write(
            root.join("site.yaml"),
            "pagesDir: pages\noutputsDir: out\nthemeFile: theme/theme.yaml\n",
        )
        .unwrap();
        fs::write(
            root.join("theme/theme.yaml"),
            "templatesDir: templates\nrawFilesDir: raw\n",
        )
        .unwrap();
        fs::write(root.join("theme/templates/post.html"), "{{ title }}").unwrap();
        fs::write(
            root.join("pages/hello.md"),
            "---\ntitle: Hello\ntemplate: post\n---\nHi\n",
        )
        .unwrap();

        args(usize::MAX).execute(root.to_path_buf()).await.unwrap();

        assert_eq!(fs::read_to_string(root.join("out/hello.html")).unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_execute_missing_site_file() {
        let temp_dir = tempfile::tempdir().unwrap();

        let err = args(usize::MAX)
            .execute(temp_dir.path().to_path_buf())
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Build(BuildError::Config(_))));
        assert!(err.to_string().starts_with("Site config file not found"));
    }
}
