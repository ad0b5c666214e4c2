//! Mies CLI - static blog generator.
//!
//! `mies <DIR>` builds the site described by `<DIR>/site.yaml`. Without a
//! directory the usage text is shown.

mod build;
mod error;
mod output;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use build::BuildArgs;
use error::{CliError, error_chain};
use output::Output;

/// Mies - static blog generator.
#[derive(Parser)]
#[command(name = "mies", version, about)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();
    let verbose = cli.build.verbose;

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to INFO
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(site_dir) = cli.build.site_dir.clone() else {
        return match Cli::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        site_dir = %site_dir.display(),
        "Starting up"
    );

    let result = tokio::runtime::Runtime::new()
        .map_err(CliError::from)
        .and_then(|rt| rt.block_on(cli.build.execute(site_dir)));

    if let Err(err) = result {
        let mut chain = error_chain(&err).into_iter();
        if let Some(message) = chain.next() {
            output.error(&format!("Error: {message}"));
        }
        if verbose {
            for cause in chain {
                output.error(&format!("  Caused by: {cause}"));
            }
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
