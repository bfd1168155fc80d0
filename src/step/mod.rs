//! NSIS build step.
//!
//! Runs the NSIS compiler (`makensis`) for one build: resolves the selected
//! installation for the executing node and environment, assembles the
//! command line from the script path and free-form arguments, runs the
//! compiler while streaming its output to the build log, and reports success
//! when it exits with code 0.
//!
//! # Configuration
//!
//! Installations are kept in `[[installation]]` tables:
//!
//! ```toml
//! [[installation]]
//! name = "v3"
//! home = "C:\\NSIS\\makensis.exe"
//! ```
//!
//! # Resolution
//!
//! | Step selects | Executable | Existence check |
//! |--------------|------------|-----------------|
//! | nothing / unknown name | `makensis.exe` from the PATH | no |
//! | a known installation | its home, node override then `${VAR}` expansion | yes |

#![warn(missing_docs)]

mod descriptor;
mod error;
mod invoker;
mod listener;
mod settings;
mod utils;

pub use descriptor::{FieldSpec, FormValidation, NsisDescriptor, NsisStep, StepDescriptor, StepSchema};
pub use error::{Context, Error, ErrorExt, Result};
pub use invoker::{DEFAULT_EXECUTABLE, Invoker, command_line};
pub use listener::{BufferListener, BuildListener};
pub use settings::{
    BuildContext, Installation, InstallationRepository, InvocationRequest, LOCAL_NODE_NAME,
    MemoryRepository, NodeContext, TomlRepository, ToolLocation, VariableMap,
};
pub use utils::{ArgumentList, expand, normalize, replace_macro, tokenize};
