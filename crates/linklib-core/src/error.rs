//! Error types for linklib.
//!
//! Path resolution failures are surfaced to the caller as `LinkError`. Bridge
//! reads and writes never produce a `LinkError`; they degrade to
//! [`Missing`](crate::bridge::Missing) instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the linklib crate.
#[derive(Debug, Error)]
pub enum LinkError {
    // Path resolution errors
    #[error("Error loading object '{path}': not a full path")]
    InvalidPath { path: String },

    #[error("Module '{module}' doesn't define any object named '{name}'")]
    UnresolvedLookup { module: String, name: String },

    #[error("Unexpected argument type, expected string or object, got: {type_name}")]
    UnsupportedInputType { type_name: String },

    #[error("No module named '{name}'")]
    ModuleNotFound { name: String },

    #[error("No loader bound to link '{path}'")]
    NoLoaderBound { path: String },

    // Bridge errors
    #[error("Operation '{operation}' is not implemented for read hook '{hook}'")]
    UnsupportedOperation { operation: String, hook: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for linklib operations.
pub type Result<T> = std::result::Result<T, LinkError>;

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        LinkError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl LinkError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        LinkError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }
}
