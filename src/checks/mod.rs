//! Per-tool check adapters.
//!
//! Each external tool is wrapped in an adapter implementing [`Check`]. The
//! adapter owns the tool's argument vector, its install source, and its
//! success predicate, so the runner never special-cases individual tools.

pub mod builtin;

use crate::config::Config;
use crate::core::executor::CommandOutput;

/// Classification of a finished check.
#[derive(Debug, Clone)]
pub struct Verdict {
    /// Whether the check passed.
    pub passed: bool,
    /// Diagnostic text to show when the check failed. Empty on success.
    pub report: String,
}

impl Verdict {
    /// A passing verdict with no report.
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            report: String::new(),
        }
    }

    /// A failing verdict carrying the tool's diagnostics.
    #[must_use]
    pub fn fail(report: impl Into<String>) -> Self {
        Self {
            passed: false,
            report: report.into(),
        }
    }
}

/// A prerequisite binary that can be fetched with `go install`.
#[derive(Debug, Clone, Copy)]
pub struct Prerequisite {
    /// Name of the binary looked up in PATH.
    pub tool: &'static str,
    /// Module paths passed to `go install <module>@latest`.
    pub modules: &'static [&'static str],
}

/// One external verification command plus its success criterion.
pub trait Check: Send + Sync {
    /// Short name shown in reports.
    fn name(&self) -> &'static str;

    /// Argument vector to launch.
    fn command(&self, config: &Config) -> Vec<String>;

    /// Binary to fetch if the launch fails because it is absent.
    fn prerequisite(&self) -> Option<&Prerequisite> {
        None
    }

    /// Classifies the captured output as pass or fail.
    fn judge(&self, output: &CommandOutput) -> Verdict;
}

impl std::fmt::Debug for dyn Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check").field("name", &self.name()).finish()
    }
}

/// Exit-code predicate: non-zero exit status means failure.
///
/// Output is discarded on success and kept for the report on failure.
pub(crate) fn judge_exit_code(output: &CommandOutput) -> Verdict {
    if output.success() {
        Verdict::pass()
    } else {
        Verdict::fail(output.combined_output())
    }
}

/// Output-emptiness predicate: any captured output means failure.
///
/// The exit status is ignored; these tools exit zero even when they find
/// problems. An optional hint line is prepended to the failure report.
pub(crate) fn judge_output_empty(output: &CommandOutput, hint: Option<&str>) -> Verdict {
    judge_text(&output.combined_output(), hint)
}

/// Output-emptiness predicate over already-filtered text.
pub(crate) fn judge_text(text: &str, hint: Option<&str>) -> Verdict {
    if text.trim().is_empty() {
        return Verdict::pass();
    }
    match hint {
        Some(hint) => Verdict::fail(format!("{hint}\n{text}")),
        None => Verdict::fail(text.to_string()),
    }
}
