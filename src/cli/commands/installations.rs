//! `nsis-step installations`: edit the installation list.

use crate::cli::{InstallationsCommand, OutputManager};
use crate::error::{CliError, Result};
use crate::step::{Installation, InstallationRepository, NsisDescriptor, TomlRepository};
use std::path::Path;
use std::sync::Arc;

/// Executes an installations subcommand against the file at `config_path`.
pub fn manage_installations(
    command: &InstallationsCommand,
    config_path: &Path,
    output: &OutputManager,
) -> Result<i32> {
    let repository = Arc::new(TomlRepository::new(config_path));
    let descriptor = NsisDescriptor::new(repository.clone());

    match command {
        InstallationsCommand::List { json } => {
            let installations = descriptor.installations()?;
            if *json {
                output.line(&serde_json::to_string_pretty(&installations)?);
            } else if installations.is_empty() {
                let _ = output.info(&format!(
                    "No installations configured in {}",
                    repository.path().display()
                ));
            } else {
                for installation in &installations {
                    output.line(&format!("{}\t{}", installation.name, installation.home));
                }
            }
        }
        InstallationsCommand::Add { name, home } => {
            let mut installations = repository.list()?;
            if installations.iter().any(|i| &i.name == name) {
                return Err(CliError::DuplicateInstallation { name: name.clone() }.into());
            }
            installations.push(Installation::new(name.clone(), home.clone()));
            descriptor.set_installations(&installations)?;
            let _ = output.success(&format!("Added installation {} -> {}", name, home));
        }
        InstallationsCommand::Remove { name } => {
            let mut installations = repository.list()?;
            let before = installations.len();
            installations.retain(|i| &i.name != name);
            if installations.len() == before {
                return Err(CliError::UnknownInstallation { name: name.clone() }.into());
            }
            descriptor.set_installations(&installations)?;
            let _ = output.success(&format!("Removed installation {}", name));
        }
    }

    Ok(0)
}
