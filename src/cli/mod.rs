//! Command line interface for the NSIS build step.
//!
//! The binary plays the host's part: it loads the configuration, assembles
//! the build context from the process environment and the command line, and
//! runs the step.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, InstallationsCommand, RunArgs};
pub use output::OutputManager;

use crate::error::Result;
use std::path::PathBuf;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Executes already parsed arguments and returns the process exit code.
pub async fn execute(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.quiet);
    let config_path = config_path(&args)?;

    match args.command {
        Command::Run(run) => commands::run_step(&run, &config_path, &output).await,
        Command::Installations(command) => {
            commands::manage_installations(&command, &config_path, &output)
        }
    }
}

fn config_path(args: &Args) -> Result<PathBuf> {
    match &args.config {
        Some(path) => Ok(path.clone()),
        None => crate::config::default_path(),
    }
}
