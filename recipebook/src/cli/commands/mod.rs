//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod build;
pub mod completions;
pub mod list;
pub mod show;
pub mod validate;
pub mod version;

use recipebook_core::config::{SiteConfig, load_config};
use recipebook_core::store::{ContentStore, LoadReport, StoreOptions};

use crate::cli::args::{Cli, Commands, SourceArgs};
use crate::error::RecipebookError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), RecipebookError> {
    match cli.command {
        Commands::Build(args) => build::run(&args, cli.quiet),
        Commands::Validate(args) => validate::run(&args),
        Commands::List(args) => list::run(&args),
        Commands::Show(args) => show::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}

/// Site configuration plus the recipes it points at.
#[derive(Debug)]
pub struct Sources {
    /// Loaded configuration, with overrides applied.
    pub site: SiteConfig,
    /// Loaded recipes and per-file failures.
    pub report: LoadReport,
}

/// Load the configuration and the content directory.
///
/// `--content-dir` takes precedence over the configuration's
/// `content_dir`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the content
/// directory does not exist.
pub fn load_sources(args: &SourceArgs) -> Result<Sources, RecipebookError> {
    let mut site = load_config(args.config.as_deref())?;
    if let Some(ref dir) = args.content_dir {
        site.content_dir.clone_from(dir);
    }

    tracing::info!(content_dir = %site.content_dir.display(), "loading recipes");
    let report = ContentStore::load(&site.content_dir, &StoreOptions::default())?;
    tracing::info!(
        recipes = report.store.len(),
        failures = report.failures.len(),
        "recipes loaded"
    );

    Ok(Sources { site, report })
}

/// Log per-file load failures for commands that carry on without them.
pub fn warn_failures(report: &LoadReport) {
    for failure in &report.failures {
        tracing::warn!("skipping {failure}");
    }
}
