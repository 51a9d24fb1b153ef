//! Error types for `recipebook`
//!
//! Aggregates the library error types and maps each to a process exit
//! code.

use recipebook_core::error::{ConfigError, ContentError};
use recipebook_site::SiteError;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `recipebook` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Content or configuration error (missing directory, invalid YAML)
    pub const CONTENT_ERROR: i32 = 2;

    /// I/O error (unreadable file, unwritable output directory)
    pub const IO_ERROR: i32 = 3;

    /// The corpus failed validation
    pub const VALIDATION_ERROR: i32 = 4;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `recipebook` operations.
#[derive(Debug, Error)]
pub enum RecipebookError {
    /// Recipe loading error
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Site configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Site generation error
    #[error(transparent)]
    Site(#[from] SiteError),

    /// Validation reported errors (or warnings under `--strict`)
    #[error("validation failed: {errors} error(s), {warnings} warning(s)")]
    ValidationFailed {
        /// Number of errors
        errors: usize,
        /// Number of warnings
        warnings: usize,
    },

    /// No recipe has the requested slug
    #[error("recipe not found: {slug}{}", suggestion.as_ref().map_or_else(String::new, |s| format!(" (did you mean \"{s}\"?)")))]
    RecipeNotFound {
        /// Requested slug
        slug: String,
        /// Closest existing slug, if any
        suggestion: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RecipebookError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Content(ContentError::Io { .. })
            | Self::Site(SiteError::Io { .. })
            | Self::Config(ConfigError::Io { .. })
            | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Content(_) | Self::Config(_) => ExitCode::CONTENT_ERROR,
            Self::ValidationFailed { .. } => ExitCode::VALIDATION_ERROR,
            Self::Site(_) | Self::RecipeNotFound { .. } | Self::Json(_) => ExitCode::ERROR,
        }
    }
}
