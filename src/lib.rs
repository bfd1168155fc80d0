//! NSIS build step library
//!
//! Runs the NSIS installer compiler (`makensis`) as a step of a CI build:
//! - resolves named compiler installations per node and environment
//! - expands `${VAR}` macros in the script path and arguments
//! - streams the compiler output to the build log
//! - maps the exit code to success or failure
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod step;

// Re-export commonly used types
pub use error::{AppError, CliError, Result};
