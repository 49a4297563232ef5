//! Error types for gosm
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gosm operations
pub type GosmResult<T> = Result<T, GosmError>;

/// Main error type for gosm operations
#[derive(Error, Debug)]
pub enum GosmError {
    /// Template text could not be parsed into a document with a mapping root
    #[error("invalid workflow template at line {line}: {message}")]
    Structure { line: usize, message: String },

    /// No step carries the sentinel name (only raised under the strict policy)
    #[error("no step named '{step}' found in workflow template")]
    MissingInjectionTarget { step: String },

    /// Secret name violates the organization secret naming rules
    #[error("invalid secret name '{name}': {reason}")]
    InvalidSecretName { name: String, reason: String },

    /// Token environment variable is not set
    #[error("missing GitHub token - set the {var} environment variable")]
    MissingToken { var: String },

    /// GitHub answered with a non-success status
    #[error("GitHub API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Command arguments do not describe a runnable operation
    #[error("{0}")]
    Usage(String),

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GosmError {
    pub(crate) fn structure(line: usize, message: impl Into<String>) -> Self {
        GosmError::Structure {
            line,
            message: message.into(),
        }
    }
}
