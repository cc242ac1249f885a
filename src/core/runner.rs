//! Check runner for executing presubmit checks.
//!
//! This module orchestrates the execution of the check suite: a batch of
//! prerequisite installs, then every check fanned out concurrently and
//! drained in launch order.

use crate::checks::{Check, Prerequisite};
use crate::config::Config;
use crate::core::error::{Error, Result};
use crate::core::executor::{CommandOutput, ExecuteOptions, Executor};
use crate::core::installer;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Result of running a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Diagnostic output from the check. Empty on success.
    pub report: String,
    /// Duration the check took to run.
    pub duration: Duration,
}

/// Result of running all checks.
#[derive(Debug)]
pub struct RunResult {
    /// Individual check results, in launch order.
    pub checks: Vec<CheckResult>,
    /// Total wall-clock duration, including prerequisite installs.
    pub duration: Duration,
}

impl RunResult {
    /// Returns true if all checks passed.
    #[must_use]
    pub fn success(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Returns the number of passed checks.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Returns the number of failed checks.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Returns failed check results.
    #[must_use]
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Runner for executing checks.
#[derive(Debug)]
pub struct Runner {
    config: Config,
}

impl Runner {
    /// Creates a new runner with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the given checks and aggregates their results.
    ///
    /// Every check runs to completion regardless of individual failures;
    /// the aggregate fails if and only if at least one check failed.
    pub async fn run(&self, checks: Vec<Box<dyn Check>>) -> Result<RunResult> {
        let start = std::time::Instant::now();

        if checks.is_empty() {
            return Ok(RunResult {
                checks: Vec::new(),
                duration: start.elapsed(),
            });
        }

        self.ensure_prerequisites(&checks).await?;

        let semaphore = Arc::new(Semaphore::new(concurrency::available_parallelism()));
        let mut handles = Vec::with_capacity(checks.len());

        for check in checks {
            let sem = Arc::clone(&semaphore);
            let config = self.config.clone();

            handles.push(tokio::spawn(async move {
                // Acquire semaphore permit; if semaphore is closed, treat as internal error
                let _permit = sem.acquire().await.map_err(|_| Error::Internal {
                    message: "Semaphore closed unexpectedly".to_string(),
                })?;
                run_check(check.as_ref(), &config).await
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(result) => results.push(result?),
                Err(e) => {
                    return Err(Error::Internal {
                        message: format!("Task join error: {e}"),
                    });
                },
            }
        }

        Ok(RunResult {
            checks: results,
            duration: start.elapsed(),
        })
    }

    /// Runs a single check.
    pub async fn run_single(&self, check: &dyn Check) -> Result<CheckResult> {
        run_check(check, &self.config).await
    }

    /// Installs missing prerequisite tools as a concurrent batch.
    ///
    /// Installs are launched together and drained in order; the check phase
    /// does not start until every prerequisite is present.
    async fn ensure_prerequisites(&self, checks: &[Box<dyn Check>]) -> Result<()> {
        let mut missing: Vec<Prerequisite> = Vec::new();
        for prereq in checks.iter().filter_map(|c| c.prerequisite()) {
            if Executor::command_exists(prereq.tool) {
                continue;
            }
            if missing.iter().any(|p| p.tool == prereq.tool) {
                continue;
            }
            missing.push(*prereq);
        }

        if missing.is_empty() {
            tracing::debug!("All prerequisite tools present");
            return Ok(());
        }

        let mut handles = Vec::with_capacity(missing.len());
        for prereq in missing {
            let root = self.config.root().to_path_buf();
            handles.push(tokio::spawn(async move {
                installer::install(&Executor::new(), &prereq, &root).await
            }));
        }

        for handle in handles {
            match handle.await {
                Ok(result) => result?,
                Err(e) => {
                    return Err(Error::Internal {
                        message: format!("Task join error: {e}"),
                    });
                },
            }
        }

        tracing::info!("Prerequisites check completed");
        Ok(())
    }
}

/// Runs a check asynchronously (for parallel execution).
async fn run_check(check: &dyn Check, config: &Config) -> Result<CheckResult> {
    let name = check.name();

    // Show progress
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .ok()
            .unwrap_or_else(ProgressStyle::default_spinner),
    );
    pb.set_message(format!("Running {name}..."));
    pb.enable_steady_tick(Duration::from_millis(100));

    let launched = launch_with_install(check, config).await;
    pb.finish_and_clear();
    let output = launched?;

    let verdict = check.judge(&output);

    if verdict.passed {
        eprintln!("{} {name}", style("✓").green());
    } else {
        eprintln!("{} {name}", style("✗").red());
    }

    Ok(CheckResult {
        name: name.to_string(),
        passed: verdict.passed,
        report: verdict.report,
        duration: output.duration,
    })
}

/// Launches the check's command, installing its prerequisite and retrying
/// once if the binary is absent.
async fn launch_with_install(check: &dyn Check, config: &Config) -> Result<CommandOutput> {
    let argv = check.command(config);
    let options = ExecuteOptions::default().cwd(config.root());
    let executor = Executor::new();

    match executor.execute(&argv, options.clone()).await {
        Ok(output) => Ok(output),
        Err(e) if e.is_tool_missing() => {
            let Some(prereq) = check.prerequisite() else {
                return Err(e);
            };
            installer::install(&executor, prereq, config.root()).await?;
            executor.execute(&argv, options).await
        },
        Err(e) => Err(e),
    }
}

/// Concurrency utilities for parallel execution.
mod concurrency {
    /// Returns the number of available CPU cores for parallel execution.
    pub fn available_parallelism() -> usize {
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4)
    }
}
