//! Configuration and per-build inputs of the NSIS step.
//!
//! This module provides the installation model, the execution node
//! description, the request/context pair handed to the invoker for each
//! build, and the repositories that hold the installation list.

mod installation;
mod node;
mod repository;
mod request;

use std::collections::BTreeMap;

/// Variable name to value mapping (environment snapshot or build variables).
pub type VariableMap = BTreeMap<String, String>;

pub use installation::Installation;
pub use node::{LOCAL_NODE_NAME, NodeContext, ToolLocation};
pub use repository::{InstallationRepository, MemoryRepository, TomlRepository};
pub use request::{BuildContext, InvocationRequest};
