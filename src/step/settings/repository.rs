//! Storage of the configured installation list.

use super::Installation;
use crate::step::error::{Context, Error, ErrorExt, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Source of the configured installations.
///
/// Invocations only read a snapshot through [`list`](Self::list); `save`
/// belongs to whoever edits the configuration.
pub trait InstallationRepository: Send + Sync {
    /// Returns a snapshot of every installation.
    fn list(&self) -> Result<Vec<Installation>>;

    /// Replaces the stored list.
    fn save(&self, installations: &[Installation]) -> Result<()>;

    /// Returns the first installation called `name`.
    ///
    /// `None` when `name` is `None` or nothing matches.
    fn find(&self, name: Option<&str>) -> Result<Option<Installation>> {
        let Some(name) = name else {
            return Ok(None);
        };
        Ok(self.list()?.into_iter().find(|i| i.name == name))
    }
}

/// In-process repository.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    installations: RwLock<Vec<Installation>>,
}

impl MemoryRepository {
    /// Creates a repository holding `installations`.
    pub fn new(installations: Vec<Installation>) -> Self {
        Self {
            installations: RwLock::new(installations),
        }
    }
}

impl InstallationRepository for MemoryRepository {
    fn list(&self) -> Result<Vec<Installation>> {
        self.installations
            .read()
            .map(|list| list.clone())
            .map_err(|_| Error::GenericError("installation list lock poisoned".into()))
    }

    fn save(&self, installations: &[Installation]) -> Result<()> {
        let mut list = self
            .installations
            .write()
            .map_err(|_| Error::GenericError("installation list lock poisoned".into()))?;
        *list = installations.to_vec();
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Default)]
struct InstallationFile {
    #[serde(default, rename = "installation")]
    installations: Vec<Installation>,
}

/// Repository backed by the `[[installation]]` tables of a TOML file.
///
/// A missing file reads as an empty list. Saving keeps every other table of
/// the file intact.
#[derive(Debug, Clone)]
pub struct TomlRepository {
    path: PathBuf,
}

impl TomlRepository {
    /// Creates a repository over the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Option<toml::Table>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let table = toml::from_str::<toml::Table>(&contents)
                    .map_err(Error::from)
                    .with_context(|| format!("parsing {}", self.path.display()))?;
                Ok(Some(table))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).fs_context("reading installation list", &self.path),
        }
    }
}

impl InstallationRepository for TomlRepository {
    fn list(&self) -> Result<Vec<Installation>> {
        let Some(table) = self.read_table()? else {
            log::debug!("{} does not exist, no installations configured", self.path.display());
            return Ok(Vec::new());
        };

        let file = toml::Value::Table(table)
            .try_into::<InstallationFile>()
            .map_err(Error::from)
            .with_context(|| format!("reading installations from {}", self.path.display()))?;
        Ok(file.installations)
    }

    fn save(&self, installations: &[Installation]) -> Result<()> {
        let mut table = self.read_table()?.unwrap_or_default();

        let file = InstallationFile {
            installations: installations.to_vec(),
        };
        table.remove("installation");
        if let toml::Value::Table(serialized) = toml::Value::try_from(&file)? {
            table.extend(serialized);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).fs_context("creating configuration directory", parent)?;
        }

        let contents = toml::to_string_pretty(&table)?;
        std::fs::write(&self.path, contents).fs_context("writing installation list", &self.path)?;

        log::info!(
            "Saved {} installation(s) to {}",
            installations.len(),
            self.path.display()
        );
        Ok(())
    }
}
