//! Named compiler installations and their per-node/per-environment resolution.

use super::{NodeContext, VariableMap};
use crate::step::utils::replace_macro;
use serde::{Deserialize, Serialize};

/// A named reference to a `makensis` binary.
///
/// # Configuration
///
/// ```toml
/// [[installation]]
/// name = "v3"
/// home = "C:\\NSIS\\makensis.exe"
/// ```
///
/// `home` may contain `${VAR}` tokens; they are expanded per build by
/// [`Installation::for_environment`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    /// Unique, user-chosen name.
    pub name: String,

    /// Path to the compiler binary.
    pub home: String,
}

impl Installation {
    /// Creates an installation.
    pub fn new(name: impl Into<String>, home: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            home: home.into(),
        }
    }

    /// Returns the copy that applies on `node`.
    ///
    /// A node may relocate an installation through a tool location with the
    /// same name; otherwise `home` is kept.
    pub fn for_node(&self, node: &NodeContext) -> Installation {
        let home = match node.tool_home(&self.name) {
            Some(home) => {
                log::debug!(
                    "Node {} overrides home of installation {}: {}",
                    node.name,
                    self.name,
                    home
                );
                home.to_string()
            }
            None => self.home.clone(),
        };

        Installation {
            name: self.name.clone(),
            home,
        }
    }

    /// Returns the copy with `home` macro-expanded against `environment`.
    pub fn for_environment(&self, environment: &VariableMap) -> Installation {
        Installation {
            name: self.name.clone(),
            home: replace_macro(&self.home, environment),
        }
    }

    /// Applies [`for_node`](Self::for_node) then
    /// [`for_environment`](Self::for_environment).
    ///
    /// The order matters: a node override may itself carry tokens that only
    /// the environment can resolve.
    pub fn resolve(&self, node: &NodeContext, environment: &VariableMap) -> Installation {
        self.for_node(node).for_environment(environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::settings::ToolLocation;

    fn env(pairs: &[(&str, &str)]) -> VariableMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_for_node_without_override_keeps_home() {
        let inst = Installation::new("v3", "/opt/nsis/makensis");
        let node = NodeContext::new("agent-1", true);
        assert_eq!(inst.for_node(&node), inst);
    }

    #[test]
    fn test_for_node_uses_matching_tool_location() {
        let inst = Installation::new("v3", "/opt/nsis/makensis");
        let node = NodeContext::new("agent-1", true)
            .with_tool_location(ToolLocation::new("v2", "/ignored"))
            .with_tool_location(ToolLocation::new("v3", "/usr/local/bin/makensis"));
        assert_eq!(inst.for_node(&node).home, "/usr/local/bin/makensis");
    }

    #[test]
    fn test_for_environment_expands_home() {
        let inst = Installation::new("v3", "${NSIS_HOME}/makensis");
        let resolved = inst.for_environment(&env(&[("NSIS_HOME", "/opt/nsis")]));
        assert_eq!(resolved.home, "/opt/nsis/makensis");
        assert_eq!(resolved.name, "v3");
    }

    #[test]
    fn test_resolve_expands_tokens_introduced_by_node() {
        let inst = Installation::new("v3", "/opt/nsis/makensis");
        let node = NodeContext::new("win", false)
            .with_tool_location(ToolLocation::new("v3", "${TOOLS}\\NSIS\\makensis.exe"));
        let resolved = inst.resolve(&node, &env(&[("TOOLS", "D:\\tools")]));
        assert_eq!(resolved.home, "D:\\tools\\NSIS\\makensis.exe");
    }
}
