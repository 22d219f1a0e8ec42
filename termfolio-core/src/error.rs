//! Error types for the termfolio core.
//!
//! Uses `thiserror` for public API error types. Command failures are always
//! recovered at the dispatch boundary; the remaining variants surface from
//! configuration and profile loading, which happen before a session starts.

use std::path::PathBuf;

/// Top-level error type for the termfolio core library.
#[derive(Debug, thiserror::Error)]
pub enum TermfolioError {
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures raised by a command handler.
///
/// The `Display` text of each variant is what the user sees after
/// "Error executing command:".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("{message}")]
    Failed { message: String },

    #[error("invalid arguments for '{name}': {reason}")]
    InvalidArguments { name: String, reason: String },

    #[error("no {what} available")]
    MissingData { what: String },
}

impl CommandError {
    /// Shorthand for a plain failure message.
    pub fn failed(message: impl Into<String>) -> Self {
        CommandError::Failed {
            message: message.into(),
        }
    }

    pub fn invalid_arguments(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CommandError::InvalidArguments {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from loading or validating profile data.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported profile format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Profile parse error: {message}")]
    Parse { message: String },

    #[error("Invalid profile: {reason}")]
    Invalid { reason: String },
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `TermfolioError`.
pub type Result<T> = std::result::Result<T, TermfolioError>;
