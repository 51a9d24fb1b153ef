//! `recipebook` - static site builder for Kubernetes recipe collections

use clap::Parser;

use recipebook::cli::args::Cli;
use recipebook::cli::commands;
use recipebook::error::ExitCode;
use recipebook::observability::{LogOptions, init_logging};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::USAGE_ERROR
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(&LogOptions::from_cli(&cli));

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
