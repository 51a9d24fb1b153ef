//! Version information display
//!
//! Prints version metadata in human or JSON format.

use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::RecipebookError;

/// Print version information.
///
/// # Errors
///
/// Returns `RecipebookError::Json` if JSON output cannot be serialized.
pub fn run(args: &VersionArgs) -> Result<(), RecipebookError> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => {
            println!("{name} {version}");
        }
        OutputFormat::Json => {
            let info = json!({
                "name": name,
                "version": version,
                "rustVersion": env!("CARGO_PKG_RUST_VERSION"),
            });
            println!("{}", serde_json::to_string(&info)?);
        }
    }
    Ok(())
}
