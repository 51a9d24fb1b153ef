//! `build` command handler.
//!
//! Loads the recipes, validates them and writes the static site.

use recipebook_site::{validate_corpus, write_site};

use super::{load_sources, validate::print_issues, warn_failures};
use crate::cli::args::BuildArgs;
use crate::error::RecipebookError;

/// Execute `build`.
///
/// Validation runs first and aborts the build on errors (or on warnings
/// with `--strict`). With `--skip-validation` only the recipes that
/// loaded are rendered.
///
/// # Errors
///
/// Returns an error if loading or validation fails or the output
/// cannot be written.
pub fn run(args: &BuildArgs, quiet: bool) -> Result<(), RecipebookError> {
    let mut sources = load_sources(&args.source)?;
    if let Some(ref output) = args.output {
        sources.site.output_dir.clone_from(output);
    }
    let report = &sources.report;

    if args.skip_validation {
        tracing::warn!("validation skipped");
        warn_failures(report);
    } else {
        let validation = validate_corpus(&report.store, &report.failures, &sources.site);
        print_issues(&validation);
        if validation.has_errors(args.strict) {
            return Err(RecipebookError::ValidationFailed {
                errors: validation.error_count(),
                warnings: validation.warning_count(),
            });
        }
    }

    let summary = write_site(&report.store, &sources.site, &sources.site.output_dir)?;
    tracing::info!(
        output = %summary.output_dir.display(),
        pages = summary.pages(),
        "site built"
    );

    if !quiet {
        println!(
            "Built {} recipe(s), {} page(s) into {}",
            summary.recipes,
            summary.pages(),
            summary.output_dir.display()
        );
        if summary.sitemap {
            println!("Wrote sitemap.xml");
        }
    }

    Ok(())
}
