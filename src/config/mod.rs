//! Configuration file discovery and loading.
//!
//! One TOML file holds the installation list and the description of the
//! node the binary runs on:
//!
//! ```toml
//! [[installation]]
//! name = "v3"
//! home = "${NSIS_HOME}/makensis"
//!
//! [node]
//! name = "linux-agent"
//! unix = true
//! ```

use crate::error::{AppError, CliError, Result};
use crate::step::{Installation, NodeContext};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configuration path.
pub const CONFIG_ENV: &str = "NSIS_STEP_CONFIG";

/// File name inside the per-user configuration directory.
const CONFIG_FILE: &str = "config.toml";

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Configured installations.
    #[serde(default, rename = "installation")]
    pub installations: Vec<Installation>,

    /// Node the build runs on.
    #[serde(default)]
    pub node: NodeContext,
}

/// Returns `<config dir>/nsis-step/config.toml`.
pub fn default_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("nsis-step").join(CONFIG_FILE))
        .ok_or_else(|| {
            AppError::Cli(CliError::InvalidArguments {
                reason: format!(
                    "No configuration directory on this system; pass --config or set {}",
                    CONFIG_ENV
                ),
            })
        })
}

/// Loads the configuration at `path`.
///
/// A missing file yields the default configuration: no installations and
/// the local node.
pub fn load(path: &Path) -> Result<Config> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(AppError::Anyhow(
                anyhow::Error::new(e).context(format!("Failed to read {}", path.display())),
            ));
        }
    };

    let config: Config = toml::from_str(&contents)?;
    log::debug!(
        "Loaded {} installation(s) for node {} from {}",
        config.installations.len(),
        config.node.name,
        path.display()
    );
    Ok(config)
}
