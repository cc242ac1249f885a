//! CLI command implementations.

use crate::checks::{builtin, Check};
use crate::cli::Cli;
use crate::config::Config;
use crate::core::error::Result;
use crate::core::runner::{RunResult, Runner};
use console::style;
use std::process::ExitCode;

/// Dispatches to a single hidden-flag check or the full suite.
pub async fn run(cli: &Cli, config: Config) -> Result<ExitCode> {
    let runner = Runner::new(config);

    if let Some(check) = single_check(cli) {
        return run_one(&runner, check.as_ref()).await;
    }

    run_suite(&runner).await
}

/// Maps a hidden single-tool flag to its adapter. First flag wins.
fn single_check(cli: &Cli) -> Option<Box<dyn Check>> {
    if cli.gofmt {
        Some(Box::new(builtin::Gofmt))
    } else if cli.goimports {
        Some(Box::new(builtin::Goimports))
    } else if cli.golint {
        Some(Box::new(builtin::Golint))
    } else if cli.govet {
        Some(Box::new(builtin::Govet))
    } else {
        None
    }
}

/// Runs exactly one check and translates its verdict into an exit code.
async fn run_one(runner: &Runner, check: &dyn Check) -> Result<ExitCode> {
    let result = runner.run_single(check).await?;

    if result.passed {
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", result.report.trim_end());
        Ok(ExitCode::FAILURE)
    }
}

/// Runs the full aggregated suite and reports the outcome.
async fn run_suite(runner: &Runner) -> Result<ExitCode> {
    let result = runner.run(builtin::suite()).await?;
    report(&result);

    if result.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Prints every failing check's output and the closing pass/fail line.
fn report(result: &RunResult) {
    for failed in result.failed_checks() {
        eprintln!();
        eprintln!("{} {}:", style("✗").red().bold(), failed.name);
        println!("{}", failed.report.trim_end());
    }

    let elapsed = result.duration.as_secs_f64();
    eprintln!();
    if result.success() {
        eprintln!(
            "{} Presubmit checks succeeded in {elapsed:.3}s!",
            style("✓").green().bold()
        );
    } else {
        eprintln!(
            "{} Presubmit checks failed in {elapsed:.3}s!",
            style("✗").red().bold()
        );
    }
}
