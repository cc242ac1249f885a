//! Command execution for running checks.
//!
//! This module provides utilities for launching external tools as plain
//! argument vectors (no shell) with output capture and error handling.

use crate::core::error::{Error, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Output from a command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code of the command.
    pub exit_code: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Duration the command took to run.
    pub duration: Duration,
}

impl CommandOutput {
    /// Returns true if the command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns combined stdout and stderr output.
    #[must_use]
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Working directory for the command.
    pub cwd: Option<std::path::PathBuf>,
    /// Environment variables to set.
    pub env: Vec<(String, String)>,
}

impl ExecuteOptions {
    /// Sets the working directory.
    #[must_use]
    pub fn cwd(mut self, path: impl AsRef<Path>) -> Self {
        self.cwd = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets an environment variable.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Executor for launching external tools.
#[derive(Debug, Default)]
pub struct Executor;

impl Executor {
    /// Creates a new executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Launches an argument vector and waits for it to complete.
    ///
    /// The process inherits the ambient environment, reads nothing from
    /// stdin, and has both output streams captured. There is no timeout;
    /// the call blocks until the child exits.
    pub async fn execute(&self, argv: &[String], options: ExecuteOptions) -> Result<CommandOutput> {
        let start = std::time::Instant::now();

        let (program, args) = argv.split_first().ok_or_else(|| Error::Internal {
            message: "Empty command".to_string(),
        })?;

        let cwd = options.cwd.as_deref().unwrap_or_else(|| Path::new("."));
        tracing::debug!(cwd = %cwd.display(), command = %argv.join(" "), "launching");

        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(ref cwd) = options.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &options.env {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ToolNotFound {
                    tool: program.clone(),
                }
            } else {
                Error::io("spawn command", e)
            }
        })?;

        let (exit_code, stdout, stderr) = self.wait_for_output(&mut child).await?;

        Ok(CommandOutput {
            exit_code,
            stdout,
            stderr,
            duration: start.elapsed(),
        })
    }

    /// Waits for the command to complete and captures output.
    async fn wait_for_output(
        &self,
        child: &mut tokio::process::Child,
    ) -> Result<(i32, String, String)> {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let stdout_handle = tokio::spawn(async move {
            let mut output = String::new();
            if let Some(stdout) = stdout {
                let mut reader = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = reader.next_line().await {
                    output.push_str(&line);
                    output.push('\n');
                }
            }
            output
        });

        let stderr_handle = tokio::spawn(async move {
            let mut output = String::new();
            if let Some(stderr) = stderr {
                let mut reader = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = reader.next_line().await {
                    output.push_str(&line);
                    output.push('\n');
                }
            }
            output
        });

        let status = child
            .wait()
            .await
            .map_err(|e| Error::io("wait for command", e))?;

        let stdout = stdout_handle.await.map_err(|e| Error::Internal {
            message: format!("stdout task failed: {e}"),
        })?;
        let stderr = stderr_handle.await.map_err(|e| Error::Internal {
            message: format!("stderr task failed: {e}"),
        })?;

        Ok((status.code().unwrap_or(1), stdout, stderr))
    }

    /// Checks if a command exists in PATH.
    #[must_use]
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }
}

/// Convenience for building an argv from string literals.
pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}
