//! Command-line interface for presubmit.
//!
//! One entry point, no subcommands. With no flags the full check suite
//! runs; hidden single-tool flags each run exactly one underlying tool and
//! translate its output into an exit code.

mod commands;

use crate::config::Config;
use crate::core::error::{Error, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Runs complete presubmit checks on a Go package.
#[derive(Debug, Parser)]
#[command(
    name = "presubmit",
    author,
    version,
    about = "Runs complete presubmit checks on a Go package",
    long_about = r#"
presubmit runs the whole verification suite for a Go package in one shot:
go test, errcheck, goimports, gofmt, golint, and go vet.

Every check runs to completion, every failure is printed, and the exit
code is 0 only when everything passed. Missing lint binaries are fetched
once with `go install` before the suite runs.
"#
)]
pub struct Cli {
    /// Logs what is being run.
    #[arg(short, long)]
    pub verbose: bool,

    /// Use color output.
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Run checks from this directory instead of the current one.
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Run only the gofmt check.
    #[arg(long, hide = true)]
    pub gofmt: bool,

    /// Run only the goimports check.
    #[arg(long, hide = true)]
    pub goimports: bool,

    /// Run only the golint check.
    #[arg(long, hide = true)]
    pub golint: bool,

    /// Run only the go vet check.
    #[arg(long, hide = true)]
    pub govet: bool,
}

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Always use color.
    Always,
    /// Auto-detect color support.
    #[default]
    Auto,
    /// Never use color.
    Never,
}

/// Runs the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    setup_logging(cli.verbose);

    // Set up color
    setup_color(cli.color);

    let config = Config::discover(cli.dir.clone())?;

    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Internal {
            message: format!("Failed to create runtime: {e}"),
        })?
        .block_on(commands::run(&cli, config))
}

/// Sets up logging based on the verbosity flag.
fn setup_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "error" };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Sets up color output.
fn setup_color(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        },
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        },
        ColorChoice::Auto => {
            // Let console crate auto-detect
        },
    }
}
