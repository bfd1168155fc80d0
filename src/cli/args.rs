//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run the NSIS installer compiler as a build step
#[derive(Parser, Debug)]
#[command(
    name = "nsis-step",
    version,
    about = "Run the NSIS installer compiler (makensis) as a build step",
    long_about = "Runs makensis for one build step: resolves the selected installation, expands \
${VAR} macros in the script path and arguments, streams the compiler output and exits \
with 0 only when makensis succeeded.

Usage:
  nsis-step run --script installer.nsi
  nsis-step run --installation v3 --script installer.nsi --args '/DVERSION=${VERSION} /V3'
  nsis-step installations add --name v3 --home /usr/bin/makensis"
)]
pub struct Args {
    /// Configuration file holding installations and the node description
    ///
    /// Default: <config dir>/nsis-step/config.toml
    #[arg(short, long, global = true, env = crate::config::CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print the build log and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile an NSIS script
    Run(RunArgs),

    /// Manage configured installations
    #[command(subcommand)]
    Installations(InstallationsCommand),
}

/// Arguments of `nsis-step run`
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Name or location of the NSIS script file
    #[arg(short, long, value_name = "FILE")]
    pub script: String,

    /// Installation to use; makensis.exe from the PATH when absent or unknown
    #[arg(short, long, value_name = "NAME")]
    pub installation: Option<String>,

    /// Whitespace separated compiler arguments (quotes group words)
    #[arg(short, long = "args", value_name = "TEXT", default_value = "", allow_hyphen_values = true)]
    pub arguments: String,

    /// Build variable, expanded after the environment (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub variables: Vec<(String, String)>,

    /// Extra environment variable for expansion and for the compiler (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub environment: Vec<(String, String)>,

    /// Working directory of the compiler
    ///
    /// Default: current directory
    #[arg(short, long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Wrap the command for cmd.exe even if the configured node is Unix-like
    #[arg(long)]
    pub windows: bool,
}

/// `nsis-step installations` subcommands
#[derive(Subcommand, Debug)]
pub enum InstallationsCommand {
    /// List configured installations
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an installation
    Add {
        /// Unique installation name
        #[arg(short, long)]
        name: String,

        /// Path to the makensis binary; may contain ${VAR} tokens
        #[arg(long)]
        home: String,
    },

    /// Remove an installation
    Remove {
        /// Installation name
        #[arg(short, long)]
        name: String,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parses `KEY=VALUE`; the value may itself contain `=`.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}
