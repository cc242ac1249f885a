//! One-time fetch of missing Go tools.
//!
//! When a prerequisite binary is absent, it is installed once with
//! `go install <module>@latest` and the check retried. A second miss is
//! fatal.

use crate::checks::Prerequisite;
use crate::core::error::{Error, Result};
use crate::core::executor::{ExecuteOptions, Executor};
use std::path::Path;

/// Installs every module source listed for a prerequisite.
pub async fn install(executor: &Executor, prereq: &Prerequisite, root: &Path) -> Result<()> {
    for module in prereq.modules {
        eprintln!("Warning: installing {module}");
        tracing::warn!(tool = prereq.tool, module, "installing missing tool");

        let argv = vec![
            "go".to_string(),
            "install".to_string(),
            format!("{module}@latest"),
        ];

        let output = executor
            .execute(&argv, ExecuteOptions::default().cwd(root))
            .await
            .map_err(|e| match e {
                // No `go` binary at all: nothing further we can do.
                Error::ToolNotFound { .. } => {
                    Error::install_failed(prereq.tool, "go toolchain not found")
                },
                other => other,
            })?;

        if !output.success() {
            return Err(Error::install_failed(
                prereq.tool,
                output.combined_output().trim().to_string(),
            ));
        }
    }

    Ok(())
}
