//! Error types for modelstage operations.
//!
//! This module defines [`ModelstageError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Anticipated problems (missing source tree, missing metadata, verification
//!   shortfalls) are not errors; they are recorded in the outcome reports
//! - Use `ModelstageError` for failures that stop a command
//! - Use `anyhow::Error` (via `ModelstageError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for modelstage operations.
#[derive(Debug, Error)]
pub enum ModelstageError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No training output directory was configured.
    #[error(
        "No source root configured: set source_root in .modelstage/config.yml, \
         pass --source-root or export MODELSTAGE_SOURCE_ROOT"
    )]
    SourceRootNotConfigured,

    /// The Python interpreter is missing or too old.
    #[error("Incompatible runtime '{interpreter}': {message}")]
    RuntimeIncompatible {
        interpreter: String,
        message: String,
    },

    /// External program could not be run or failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Failed to read or write a file in the project tree.
    #[error("Failed to access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ModelstageError {
    /// Wrap an I/O error with the path it happened on.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Whether this error comes from configuration rather than execution.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
                | Self::SourceRootNotConfigured
        )
    }
}

/// Result type alias for modelstage operations.
pub type Result<T> = std::result::Result<T, ModelstageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = ModelstageError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ModelstageError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn source_root_not_configured_mentions_override() {
        let msg = ModelstageError::SourceRootNotConfigured.to_string();
        assert!(msg.contains("--source-root"));
        assert!(msg.contains("MODELSTAGE_SOURCE_ROOT"));
    }

    #[test]
    fn runtime_incompatible_displays_interpreter_and_message() {
        let err = ModelstageError::RuntimeIncompatible {
            interpreter: "python3".into(),
            message: "found 3.6.9, requires 3.8+".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("python3"));
        assert!(msg.contains("3.6.9"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = ModelstageError::CommandFailed {
            command: "python3 --version".into(),
            code: Some(127),
        };
        let msg = err.to_string();
        assert!(msg.contains("python3 --version"));
        assert!(msg.contains("127"));
    }

    #[test]
    fn file_access_displays_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ModelstageError::file_access("/models/mfcc", io_err);
        let msg = err.to_string();
        assert!(msg.contains("/models/mfcc"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn config_errors_are_classified() {
        assert!(ModelstageError::SourceRootNotConfigured.is_config_error());
        assert!(ModelstageError::ConfigValidationError {
            message: "x".into()
        }
        .is_config_error());
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!ModelstageError::Io(io_err).is_config_error());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ModelstageError = io_err.into();
        assert!(matches!(err, ModelstageError::Io(_)));
    }
}
