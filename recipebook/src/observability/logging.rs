//! Logging initialization for `recipebook`.
//!
//! Diagnostics go to stderr through `tracing`, either human-readable or
//! as newline-delimited JSON. `-v` flags raise the level of the
//! workspace crates only; dependencies stay at `warn`. `--quiet` keeps
//! errors. `RECIPEBOOK_LOG_LEVEL` replaces the computed filter entirely.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, ColorChoice};

/// Environment variable overriding the computed filter.
pub const LOG_LEVEL_ENV: &str = "RECIPEBOOK_LOG_LEVEL";

/// Crates whose level follows the verbosity flags.
const WORKSPACE_TARGETS: [&str; 3] = ["recipebook", "recipebook_core", "recipebook_site"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// Logging options taken from the global CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    /// Output format.
    pub format: LogFormat,
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// `--quiet` was given.
    pub quiet: bool,
    /// Color choice.
    pub color: ColorChoice,
}

impl LogOptions {
    /// Collect the logging flags from parsed arguments.
    #[must_use]
    pub const fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.log_format,
            verbosity: cli.verbose,
            quiet: cli.quiet,
            color: cli.color,
        }
    }

    /// Filter directive used when `RECIPEBOOK_LOG_LEVEL` is unset.
    #[must_use]
    pub fn directive(&self) -> String {
        let level = match (self.quiet, self.verbosity) {
            (true, _) => return "error".to_string(),
            (false, 0) => return "warn".to_string(),
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        };
        let mut directives = vec!["warn".to_string()];
        directives.extend(WORKSPACE_TARGETS.iter().map(|t| format!("{t}={level}")));
        directives.join(",")
    }

    fn use_ansi(&self) -> bool {
        match self.color {
            ColorChoice::Auto => {
                std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(options: &LogOptions) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(options.directive()));
    let show_target = options.verbosity >= 2;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(show_target)
        .with_writer(std::io::stderr);

    let _ = match options.format {
        LogFormat::Human => builder.with_ansi(options.use_ansi()).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
