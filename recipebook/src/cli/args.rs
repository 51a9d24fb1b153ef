//! CLI argument definitions
//!
//! All Clap derive structs for `recipebook` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Build and validate a static site from Kubernetes recipe Markdown files.
#[derive(Parser, Debug)]
#[command(name = "recipebook", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "RECIPEBOOK_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the recipes and render the static site.
    Build(BuildArgs),

    /// Check every recipe without writing output.
    Validate(ValidateArgs),

    /// List recipes from the catalog.
    List(ListArgs),

    /// Show one recipe's metadata or rendered body.
    Show(ShowArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Where recipes and site configuration are read from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to the site configuration file (default: ./recipebook.yaml if present).
    #[arg(short, long, env = "RECIPEBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Recipe directory; overrides `content_dir` from the configuration.
    #[arg(long, env = "RECIPEBOOK_CONTENT_DIR")]
    pub content_dir: Option<PathBuf>,
}

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Recipe and configuration sources.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory; overrides `output_dir` from the configuration.
    #[arg(short, long, env = "RECIPEBOOK_OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Treat validation warnings as errors.
    #[arg(long, conflicts_with = "skip_validation")]
    pub strict: bool,

    /// Render even if validation would fail.
    #[arg(long)]
    pub skip_validation: bool,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Recipe and configuration sources.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Recipe and configuration sources.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Filter by category identifier.
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by tag.
    #[arg(long)]
    pub tag: Option<String>,

    /// Filter by difficulty level.
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Recipe slug (file name without `.md`).
    pub slug: String,

    /// Recipe and configuration sources.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: ShowFormat,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    /// Metadata summary.
    #[default]
    Human,
    /// Metadata, headings and backlinks as JSON.
    Json,
    /// Rendered HTML body.
    Html,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "recipebook",
            "build",
            "--config",
            "site/recipebook.yaml",
            "--content-dir",
            "recipes",
            "--output",
            "public",
            "--strict",
        ])
        .unwrap();

        let Commands::Build(args) = cli.command else {
            panic!("Expected BuildArgs");
        };
        assert_eq!(args.source.config, Some(PathBuf::from("site/recipebook.yaml")));
        assert_eq!(args.source.content_dir, Some(PathBuf::from("recipes")));
        assert_eq!(args.output, Some(PathBuf::from("public")));
        assert!(args.strict);
        assert!(!args.skip_validation);
    }

    #[test]
    fn test_strict_conflicts_with_skip_validation() {
        let cli = Cli::try_parse_from(["recipebook", "build", "--strict", "--skip-validation"]);
        assert!(cli.is_err(), "Expected conflict error");
    }

    #[test]
    fn test_validate_defaults() {
        let cli = Cli::try_parse_from(["recipebook", "validate"]).unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("Expected ValidateArgs");
        };
        assert_eq!(args.format, OutputFormat::Human);
        assert!(!args.strict);
    }

    #[test]
    fn test_list_filters() {
        let cli = Cli::try_parse_from([
            "recipebook",
            "list",
            "--category",
            "storage",
            "--tag",
            "backup",
            "--difficulty",
            "advanced",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::List(args) = cli.command else {
            panic!("Expected ListArgs");
        };
        assert_eq!(args.category.as_deref(), Some("storage"));
        assert_eq!(args.tag.as_deref(), Some("backup"));
        assert_eq!(args.difficulty.as_deref(), Some("advanced"));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_show_requires_slug() {
        assert!(Cli::try_parse_from(["recipebook", "show"]).is_err());

        let cli = Cli::try_parse_from(["recipebook", "show", "velero-backup", "-f", "html"]).unwrap();
        let Commands::Show(args) = cli.command else {
            panic!("Expected ShowArgs");
        };
        assert_eq!(args.slug, "velero-backup");
        assert_eq!(args.format, ShowFormat::Html);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "recipebook",
            "list",
            "-vv",
            "--color",
            "never",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_help_output() {
        let result = Cli::try_parse_from(["recipebook", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let result = Cli::try_parse_from(["recipebook", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::try_parse_from(["recipebook", "completions", "powershell"]).unwrap();
        let Commands::Completions(args) = cli.command else {
            panic!("Expected CompletionsArgs");
        };
        assert_eq!(args.shell, Shell::PowerShell);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
