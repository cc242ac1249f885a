//! # presubmit
//!
//! Runs complete presubmit checks on a Go package.
//!
//! One command runs the whole suite: `go test`, `errcheck`, `goimports`,
//! `gofmt`, `golint`, and `go vet`. Every check runs to completion, every
//! failure is reported, and the process exits non-zero if anything failed.
//!
//! ## Features
//!
//! - **All checks, always**: no short-circuit; the full suite runs and every
//!   failing check's output is printed
//! - **Unreliable tools handled**: tools that always exit zero (gofmt,
//!   goimports, golint, go vet) are judged by their output instead
//! - **Auto-install**: missing lint binaries are fetched once with
//!   `go install` and the check retried
//! - **Parallel execution**: independent checks run concurrently and are
//!   reported in a stable order
//!
//! ## Example
//!
//! ```rust,no_run
//! use presubmit::{checks, Config, Runner};
//!
//! #[tokio::main]
//! async fn main() -> presubmit::Result<()> {
//!     let config = Config::discover(None)?;
//!     let runner = Runner::new(config);
//!     let result = runner.run(checks::builtin::suite()).await?;
//!
//!     if result.success() {
//!         Ok(())
//!     } else {
//!         std::process::exit(1);
//!     }
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/presubmit/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod checks;
pub mod cli;
pub mod config;
pub mod core;

// Re-export main types for convenience
pub use checks::{Check, Verdict};
pub use config::Config;
pub use core::error::{Error, Result};
pub use core::runner::{CheckResult, RunResult, Runner};
