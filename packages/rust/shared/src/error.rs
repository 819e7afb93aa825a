//! Error types for Playscout.
//!
//! Library crates use [`PlayscoutError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Playscout operations.
#[derive(Debug, thiserror::Error)]
pub enum PlayscoutError {
    /// Configuration loading or validation error (includes a missing
    /// output directory, which is checked, never created).
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error during the lightweight fetch.
    #[error("network error: {0}")]
    Network(String),

    /// Browser session error (launch, CDP, script execution).
    #[error("browser error: {0}")]
    Browser(String),

    /// Every strategy hard-failed on every URL attempted; no title was
    /// ever recovered, so there is nothing meaningful to persist.
    #[error("all attempts to fetch '{url}' failed catastrophically")]
    Catastrophic { url: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (malformed URL, bad argument).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PlayscoutError>;

impl PlayscoutError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
