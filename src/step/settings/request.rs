//! Per-execution inputs: the step's fields and the host's build context.

use super::{NodeContext, VariableMap};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The three fields configured on a build step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Name of the installation to use, if any.
    #[serde(default)]
    pub installation: Option<String>,

    /// Path to the `.nsi` script; expanded but never split.
    pub script: String,

    /// Free-form compiler arguments, possibly spanning several lines.
    #[serde(default)]
    pub arguments: String,
}

impl InvocationRequest {
    /// Creates a request for `script` with no installation and no arguments.
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            installation: None,
            script: script.into(),
            arguments: String::new(),
        }
    }

    /// Selects an installation by name.
    pub fn installation(mut self, name: impl Into<String>) -> Self {
        self.installation = Some(name.into());
        self
    }

    /// Sets the free-form argument text.
    pub fn arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }
}

/// Build-scoped state supplied by the host for one execution.
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Environment of the build; overlays the child's inherited environment.
    pub environment: VariableMap,

    /// Build parameters, consulted after `environment` during expansion.
    pub build_variables: VariableMap,

    /// Node that executes the compiler.
    pub node: NodeContext,

    /// Working directory of the compiler process.
    pub module_root: PathBuf,
}

impl BuildContext {
    /// Creates a context on `node` rooted at `module_root` with empty maps.
    pub fn new(node: NodeContext, module_root: impl AsRef<Path>) -> Self {
        Self {
            environment: VariableMap::new(),
            build_variables: VariableMap::new(),
            node,
            module_root: module_root.as_ref().to_path_buf(),
        }
    }

    /// Replaces the environment snapshot.
    pub fn environment(mut self, environment: VariableMap) -> Self {
        self.environment = environment;
        self
    }

    /// Replaces the build variables.
    pub fn build_variables(mut self, build_variables: VariableMap) -> Self {
        self.build_variables = build_variables;
        self
    }

    /// Whether commands are run without the `cmd.exe` wrapper.
    pub fn is_unix(&self) -> bool {
        self.node.unix
    }
}
