//! Built-in check definitions.
//!
//! The fixed suite for a Go package: tests, error checking, import
//! organization, formatting, lint, and static analysis.

use crate::checks::{judge_exit_code, judge_output_empty, judge_text, Check, Prerequisite, Verdict};
use crate::config::Config;
use crate::core::executor::CommandOutput;
use regex::Regex;
use std::sync::OnceLock;

/// Names of built-in checks.
pub mod names {
    /// Run the package's unit tests.
    pub const GO_TEST: &str = "go-test";
    /// Check for unchecked error returns.
    pub const ERRCHECK: &str = "errcheck";
    /// Check import organization.
    pub const GOIMPORTS: &str = "goimports";
    /// Check formatting.
    pub const GOFMT: &str = "gofmt";
    /// Run golint.
    pub const GOLINT: &str = "golint";
    /// Run go vet.
    pub const GOVET: &str = "govet";
}

static ERRCHECK_PREREQ: Prerequisite = Prerequisite {
    tool: "errcheck",
    modules: &["github.com/kisielk/errcheck"],
};

static GOIMPORTS_PREREQ: Prerequisite = Prerequisite {
    tool: "goimports",
    modules: &["golang.org/x/tools/cmd/goimports"],
};

static GOLINT_PREREQ: Prerequisite = Prerequisite {
    tool: "golint",
    modules: &["golang.org/x/lint/golint"],
};

/// Runs the package's unit tests.
#[derive(Debug, Default)]
pub struct GoTest;

impl Check for GoTest {
    fn name(&self) -> &'static str {
        names::GO_TEST
    }

    fn command(&self, _config: &Config) -> Vec<String> {
        vec!["go".into(), "test".into(), "./...".into()]
    }

    fn judge(&self, output: &CommandOutput) -> Verdict {
        judge_exit_code(output)
    }
}

/// Checks for unchecked error returns with errcheck.
#[derive(Debug, Default)]
pub struct Errcheck;

impl Check for Errcheck {
    fn name(&self) -> &'static str {
        names::ERRCHECK
    }

    fn command(&self, config: &Config) -> Vec<String> {
        vec!["errcheck".into(), config.package_pattern()]
    }

    fn prerequisite(&self) -> Option<&Prerequisite> {
        Some(&ERRCHECK_PREREQ)
    }

    fn judge(&self, output: &CommandOutput) -> Verdict {
        judge_exit_code(output)
    }
}

/// Checks import organization with goimports.
///
/// goimports doesn't return non-zero even if some files need to be updated.
#[derive(Debug, Default)]
pub struct Goimports;

impl Check for Goimports {
    fn name(&self) -> &'static str {
        names::GOIMPORTS
    }

    fn command(&self, _config: &Config) -> Vec<String> {
        vec!["goimports".into(), "-l".into(), ".".into()]
    }

    fn prerequisite(&self) -> Option<&Prerequisite> {
        Some(&GOIMPORTS_PREREQ)
    }

    fn judge(&self, output: &CommandOutput) -> Verdict {
        judge_output_empty(
            output,
            Some("These files are improperly formatted. Please run: goimports -w ."),
        )
    }
}

/// Checks formatting with gofmt.
///
/// gofmt doesn't return non-zero even if some files need to be updated.
#[derive(Debug, Default)]
pub struct Gofmt;

impl Check for Gofmt {
    fn name(&self) -> &'static str {
        names::GOFMT
    }

    fn command(&self, _config: &Config) -> Vec<String> {
        vec!["gofmt".into(), "-l".into(), "-s".into(), ".".into()]
    }

    fn judge(&self, output: &CommandOutput) -> Verdict {
        judge_output_empty(
            output,
            Some("These files are improperly formatted. Please run: gofmt -w -s ."),
        )
    }
}

/// Runs golint.
///
/// golint doesn't return non-zero ever.
#[derive(Debug, Default)]
pub struct Golint;

impl Check for Golint {
    fn name(&self) -> &'static str {
        names::GOLINT
    }

    fn command(&self, _config: &Config) -> Vec<String> {
        vec!["golint".into(), "./...".into()]
    }

    fn prerequisite(&self) -> Option<&Prerequisite> {
        Some(&GOLINT_PREREQ)
    }

    fn judge(&self, output: &CommandOutput) -> Verdict {
        judge_output_empty(output, Some("These files are not golint free."))
    }
}

/// Runs go vet.
///
/// vet is very noisy about "composite literal uses unkeyed fields" which
/// cannot be turned off, so those lines are stripped and the exit status
/// ignored.
#[derive(Debug, Default)]
pub struct Govet;

impl Check for Govet {
    fn name(&self) -> &'static str {
        names::GOVET
    }

    fn command(&self, _config: &Config) -> Vec<String> {
        vec!["go".into(), "vet".into(), "./...".into()]
    }

    fn judge(&self, output: &CommandOutput) -> Verdict {
        judge_text(&filter_vet_output(&output.combined_output()), None)
    }
}

fn vet_noise_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"composite literal uses unkeyed fields$").expect("static pattern is valid")
    })
}

/// Strips vet's known false-positive lines.
pub fn filter_vet_output(output: &str) -> String {
    output
        .lines()
        .filter(|line| !vet_noise_pattern().is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the full suite in launch order.
#[must_use]
pub fn suite() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(GoTest),
        Box::new(Errcheck),
        Box::new(Goimports),
        Box::new(Gofmt),
        Box::new(Golint),
        Box::new(Govet),
    ]
}

/// Returns true if a check name is a built-in check.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        names::GO_TEST
            | names::ERRCHECK
            | names::GOIMPORTS
            | names::GOFMT
            | names::GOLINT
            | names::GOVET
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn config() -> Config {
        Config::new(PathBuf::from("/src/pkg"), Some("example.com/pkg".into()))
    }

    fn output(exit_code: i32, stdout: &str) -> CommandOutput {
        CommandOutput {
            exit_code,
            stdout: stdout.to_string(),
            stderr: String::new(),
            duration: Duration::ZERO,
        }
    }

    // =========================================================================
    // Suite shape tests
    // =========================================================================

    #[test]
    fn test_suite_order() {
        let suite = suite();
        let names: Vec<_> = suite.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "go-test",
                "errcheck",
                "goimports",
                "gofmt",
                "golint",
                "govet"
            ]
        );
    }

    #[test]
    fn test_is_builtin() {
        assert!(is_builtin("go-test"));
        assert!(is_builtin("govet"));
        assert!(!is_builtin("custom-check"));
    }

    // =========================================================================
    // Command construction tests
    // =========================================================================

    #[test]
    fn test_go_test_command() {
        assert_eq!(GoTest.command(&config()), vec!["go", "test", "./..."]);
    }

    #[test]
    fn test_errcheck_command_uses_module_path() {
        assert_eq!(
            Errcheck.command(&config()),
            vec!["errcheck", "example.com/pkg"]
        );
    }

    #[test]
    fn test_errcheck_command_without_module() {
        let config = Config::new(PathBuf::from("/src/pkg"), None);
        assert_eq!(Errcheck.command(&config), vec!["errcheck", "./..."]);
    }

    #[test]
    fn test_gofmt_command() {
        assert_eq!(Gofmt.command(&config()), vec!["gofmt", "-l", "-s", "."]);
    }

    #[test]
    fn test_goimports_command() {
        assert_eq!(Goimports.command(&config()), vec!["goimports", "-l", "."]);
    }

    #[test]
    fn test_govet_command() {
        assert_eq!(Govet.command(&config()), vec!["go", "vet", "./..."]);
    }

    // =========================================================================
    // Prerequisite tests
    // =========================================================================

    #[test]
    fn test_prerequisites() {
        assert!(GoTest.prerequisite().is_none());
        assert!(Gofmt.prerequisite().is_none());
        assert!(Govet.prerequisite().is_none());

        let errcheck = Errcheck.prerequisite().expect("errcheck has prereq");
        assert_eq!(errcheck.tool, "errcheck");
        assert_eq!(errcheck.modules, &["github.com/kisielk/errcheck"]);

        let goimports = Goimports.prerequisite().expect("goimports has prereq");
        assert_eq!(goimports.tool, "goimports");

        let golint = Golint.prerequisite().expect("golint has prereq");
        assert_eq!(golint.modules, &["golang.org/x/lint/golint"]);
    }

    // =========================================================================
    // Predicate wiring tests
    // =========================================================================

    #[test]
    fn test_go_test_judged_by_exit_code() {
        assert!(GoTest.judge(&output(0, "ok\n")).passed);
        assert!(!GoTest.judge(&output(1, "FAIL\n")).passed);
    }

    #[test]
    fn test_gofmt_judged_by_output() {
        // Exit status is not trustworthy for gofmt
        assert!(Gofmt.judge(&output(0, "")).passed);
        let verdict = Gofmt.judge(&output(0, "main.go\n"));
        assert!(!verdict.passed);
        assert!(verdict.report.contains("gofmt -w -s ."));
        assert!(verdict.report.contains("main.go"));
    }

    #[test]
    fn test_goimports_failure_report() {
        let verdict = Goimports.judge(&output(0, "util.go\n"));
        assert!(!verdict.passed);
        assert!(verdict.report.contains("goimports -w ."));
    }

    #[test]
    fn test_golint_failure_report() {
        let verdict = Golint.judge(&output(0, "foo.go:3:1: comment required\n"));
        assert!(!verdict.passed);
        assert!(verdict.report.contains("not golint free"));
    }

    // =========================================================================
    // vet noise filter tests
    // =========================================================================

    #[test]
    fn test_filter_vet_output_strips_noise() {
        let noisy = "main.go:10: example.T composite literal uses unkeyed fields\n";
        assert_eq!(filter_vet_output(noisy), "");
    }

    #[test]
    fn test_filter_vet_output_keeps_real_diagnostics() {
        let mixed = "main.go:10: t composite literal uses unkeyed fields\n\
                     main.go:20: unreachable code\n";
        let filtered = filter_vet_output(mixed);
        assert_eq!(filtered, "main.go:20: unreachable code");
    }

    #[test]
    fn test_govet_noise_alone_passes() {
        let verdict = Govet.judge(&output(
            1,
            "x.go:1: p.T composite literal uses unkeyed fields\n",
        ));
        assert!(verdict.passed);
    }

    #[test]
    fn test_govet_real_diagnostic_fails() {
        let verdict = Govet.judge(&output(
            1,
            "x.go:1: p.T composite literal uses unkeyed fields\nx.go:9: shadowed variable\n",
        ));
        assert!(!verdict.passed);
        assert!(verdict.report.contains("shadowed variable"));
        assert!(!verdict.report.contains("unkeyed fields"));
    }

    #[test]
    fn test_govet_ignores_exit_code_when_clean() {
        assert!(Govet.judge(&output(2, "")).passed);
    }

    // =========================================================================
    // Debug formatting of trait objects
    // =========================================================================

    #[test]
    fn test_check_trait_object_debug() {
        let check: Box<dyn Check> = Box::new(Gofmt);
        let debug_str = format!("{:?}", check);
        assert!(debug_str.contains("gofmt"));
    }
}
