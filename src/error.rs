//! Error types for the command line front end.
//!
//! Library code reports through [`crate::step::Error`]; this module wraps it
//! together with argument and configuration failures of the binary.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type of the `nsis-step` binary
#[derive(Error, Debug)]
pub enum AppError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Build step errors
    #[error("Step error: {0}")]
    Step(#[from] crate::step::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// An installation name is already taken
    #[error("Installation already exists: {name}")]
    DuplicateInstallation {
        /// Installation name
        name: String,
    },

    /// An installation name is not configured
    #[error("No installation named {name}")]
    UnknownInstallation {
        /// Installation name
        name: String,
    },
}
