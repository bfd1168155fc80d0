//! The node a build step executes on.

use serde::{Deserialize, Serialize};

/// Node name used when no node is configured.
pub const LOCAL_NODE_NAME: &str = "built-in";

/// Per-node relocation of an installation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLocation {
    /// Installation name this location applies to.
    pub name: String,

    /// Path to the compiler binary on this node.
    pub home: String,
}

impl ToolLocation {
    /// Creates a tool location.
    pub fn new(name: impl Into<String>, home: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            home: home.into(),
        }
    }
}

/// Execution node description.
///
/// # Configuration
///
/// ```toml
/// [node]
/// name = "windows-agent"
/// unix = false
///
/// [[node.tool_location]]
/// name = "v3"
/// home = "D:\\tools\\nsis\\makensis.exe"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeContext {
    /// Node name, used in log lines.
    #[serde(default = "default_node_name")]
    pub name: String,

    /// Whether the node runs a Unix-like OS.
    ///
    /// Default: the OS this binary was built for
    #[serde(default = "default_unix")]
    pub unix: bool,

    /// Installation overrides for this node.
    #[serde(default, rename = "tool_location")]
    pub tool_locations: Vec<ToolLocation>,
}

fn default_node_name() -> String {
    LOCAL_NODE_NAME.to_string()
}

fn default_unix() -> bool {
    cfg!(unix)
}

impl Default for NodeContext {
    fn default() -> Self {
        Self::local()
    }
}

impl NodeContext {
    /// Creates a node with no tool locations.
    pub fn new(name: impl Into<String>, unix: bool) -> Self {
        Self {
            name: name.into(),
            unix,
            tool_locations: Vec::new(),
        }
    }

    /// Describes the machine this process runs on.
    pub fn local() -> Self {
        Self::new(LOCAL_NODE_NAME, cfg!(unix))
    }

    /// Adds a tool location.
    pub fn with_tool_location(mut self, location: ToolLocation) -> Self {
        self.tool_locations.push(location);
        self
    }

    /// Returns the home this node configures for `installation`, if any.
    pub fn tool_home(&self, installation: &str) -> Option<&str> {
        self.tool_locations
            .iter()
            .find(|loc| loc.name == installation)
            .map(|loc| loc.home.as_str())
    }
}
