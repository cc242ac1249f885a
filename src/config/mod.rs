//! Run configuration for presubmit.
//!
//! The package root and module path are resolved once, up front, and handed
//! to the runner at construction. Nothing reads process-wide globals after
//! that.

use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Name of the Go module definition file.
pub const GO_MOD_FILE: &str = "go.mod";

/// Resolved configuration for a presubmit run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the package; all checks run from here.
    root: PathBuf,
    /// Module path from go.mod, if the package has one.
    module: Option<String>,
}

impl Config {
    /// Resolves configuration for the given root, or the current directory.
    pub fn discover(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => std::env::current_dir().map_err(|e| Error::io("get current dir", e))?,
        };

        if !root.is_dir() {
            return Err(Error::RootNotFound { path: root });
        }

        let module = read_module_path(&root)?;

        Ok(Self { root, module })
    }

    /// Creates a configuration directly, without touching the filesystem.
    #[must_use]
    pub fn new(root: PathBuf, module: Option<String>) -> Self {
        Self { root, module }
    }

    /// Returns the package root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the Go module path, if known.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Returns the package pattern for tools that take one.
    ///
    /// Falls back to `./...` for pre-modules packages without a go.mod.
    #[must_use]
    pub fn package_pattern(&self) -> String {
        self.module
            .clone()
            .unwrap_or_else(|| "./...".to_string())
    }
}

/// Reads the module path from `<root>/go.mod`, if the file exists.
fn read_module_path(root: &Path) -> Result<Option<String>> {
    let path = root.join(GO_MOD_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io("read go.mod", e))?;

    Ok(parse_module_path(&content))
}

/// Extracts the module path from go.mod contents.
fn parse_module_path(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches('"');
        if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        }
    })
}
