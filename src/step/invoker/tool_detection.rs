//! PATH lookup for the default compiler name.
//!
//! Only used for diagnostics: when no installation is selected the bare name
//! is handed to the process launcher, which performs its own search.

use super::DEFAULT_EXECUTABLE;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Location of the default executable on this machine's PATH.
///
/// Cached to avoid repeating the lookup for every build.
pub static DEFAULT_ON_PATH: LazyLock<Option<PathBuf>> =
    LazyLock::new(|| match which::which(DEFAULT_EXECUTABLE) {
        Ok(path) => {
            log::debug!("Found {} at: {}", DEFAULT_EXECUTABLE, path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!(
                "{} not found in PATH: {}. The launch will fail unless the build \
                 environment provides it.",
                DEFAULT_EXECUTABLE,
                e
            );
            None
        }
    });
