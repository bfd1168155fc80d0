//! Compiler invocation.
//!
//! - `orchestrator` - the [`Invoker`] and command-line assembly
//! - `launch` - child process execution and output forwarding
//! - `tool_detection` - PATH lookup of the default executable

mod launch;
mod orchestrator;
mod tool_detection;

/// Executable used when no installation is selected or found.
pub const DEFAULT_EXECUTABLE: &str = "makensis.exe";

pub use orchestrator::{Invoker, command_line};
