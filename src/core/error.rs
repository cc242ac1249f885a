//! Error types for presubmit.
//!
//! This module defines all errors that can occur during operation.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in presubmit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Workspace errors
    // =========================================================================
    /// The configured package root does not exist or is not a directory.
    #[error("Package root not found: {path}")]
    RootNotFound {
        /// Path that was configured as the root.
        path: PathBuf,
    },

    // =========================================================================
    // Tool execution errors
    // =========================================================================
    /// An external tool's binary was not found in PATH.
    #[error("Tool not found: {tool}")]
    ToolNotFound {
        /// Name of the missing binary.
        tool: String,
    },

    /// Fetching a missing tool with `go install` failed.
    #[error("Failed to install {tool}: {message}")]
    InstallFailed {
        /// Name of the tool being installed.
        tool: String,
        /// Output or error from the install command.
        message: String,
    },

    // =========================================================================
    // I/O errors
    // =========================================================================
    /// File I/O error.
    #[error("I/O error: {message}")]
    Io {
        /// Description of what failed.
        message: String,
        /// Source error.
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Internal errors
    // =========================================================================
    /// Internal error (should never happen).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Creates a new I/O error with context.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Creates a new install failure error.
    pub fn install_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InstallFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error means a tool binary was absent.
    ///
    /// The runner keys its one-time install-and-retry policy on this.
    #[must_use]
    pub const fn is_tool_missing(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. })
    }
}
