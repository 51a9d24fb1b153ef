//! `validate` command handler.

use serde::Serialize;

use recipebook_site::{ValidationError, ValidationReport, validate_corpus};

use super::load_sources;
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::error::RecipebookError;

/// JSON shape of a validation run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationOutput<'a> {
    valid: bool,
    strict: bool,
    documents_checked: usize,
    errors: usize,
    warnings: usize,
    issues: &'a [ValidationError],
}

/// Execute `validate`.
///
/// # Errors
///
/// Returns `RecipebookError::ValidationFailed` when the corpus has errors
/// (or warnings under `--strict`), or a loading error.
pub fn run(args: &ValidateArgs) -> Result<(), RecipebookError> {
    let sources = load_sources(&args.source)?;
    let report = validate_corpus(
        &sources.report.store,
        &sources.report.failures,
        &sources.site,
    );
    let failed = report.has_errors(args.strict);

    match args.format {
        OutputFormat::Human => {
            for issue in &report.issues {
                println!("{issue}");
            }
            println!(
                "{} recipe(s) checked: {} error(s), {} warning(s)",
                report.documents_checked,
                report.error_count(),
                report.warning_count()
            );
            if !failed {
                println!("Validation passed");
            }
        }
        OutputFormat::Json => {
            let output = ValidationOutput {
                valid: !failed,
                strict: args.strict,
                documents_checked: report.documents_checked,
                errors: report.error_count(),
                warnings: report.warning_count(),
                issues: &report.issues,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if failed {
        return Err(RecipebookError::ValidationFailed {
            errors: report.error_count(),
            warnings: report.warning_count(),
        });
    }
    Ok(())
}

/// Print every issue to stderr, as `build` does before rendering.
pub fn print_issues(report: &ValidationReport) {
    for issue in &report.issues {
        eprintln!("{issue}");
    }
}
