//! Core error types for `recipebook`
//!
//! Content loading, front-matter and configuration error types shared
//! across the workspace.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::document::frontmatter::FrontMatterError;

// ============================================================================
// Content Errors
// ============================================================================

/// Errors raised while reading recipes from the content store.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The leading `---` block is missing, unterminated, or not valid YAML.
    #[error("malformed front matter in {path}: {source}")]
    MalformedFrontMatter {
        /// Path to the recipe file
        path: PathBuf,
        /// What was wrong with the block
        #[source]
        source: FrontMatterError,
    },

    /// The configured content directory does not exist
    #[error("content directory not found: {path}")]
    ContentDirNotFound {
        /// Path that was searched
        path: PathBuf,
    },

    /// A recipe file exceeds the configured size limit
    #[error("{path} is {size} bytes, exceeding the {limit} byte limit")]
    FileTooLarge {
        /// Path to the recipe file
        path: PathBuf,
        /// Actual file size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// The discovery pattern could not be compiled
    #[error("invalid content pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Pattern that failed to compile
        pattern: String,
        /// Error message from the glob compiler
        message: String,
    },

    /// Reading a file failed
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Returns the file this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::MalformedFrontMatter { path, .. }
            | Self::ContentDirNotFound { path }
            | Self::FileTooLarge { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::InvalidPattern { .. } => None,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Site configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Explicitly requested configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Reading the configuration file failed
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - the corpus cannot be published as is
    Error,
    /// Warning - publishable, but worth fixing (an error under `--strict`)
    Warning,
}

impl Severity {
    /// Upper-case label used in human-readable reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }
}
