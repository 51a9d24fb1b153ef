//! Error types for site generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing the static site.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Creating a directory or writing a file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Catalog serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
