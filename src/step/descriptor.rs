//! Registration surface for hosts that load the step as a plugin.
//!
//! A host discovers a [`StepDescriptor`], shows its [`StepSchema`] in its
//! configuration UI, validates input with the `check_*` methods and finally
//! calls [`StepDescriptor::create`] for every configured step.

use super::{
    error::{Error, Result},
    invoker::Invoker,
    listener::BuildListener,
    settings::{BuildContext, Installation, InstallationRepository, InvocationRequest},
};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of validating a single form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValidation {
    /// The value is acceptable.
    Ok,
    /// The value is rejected with a message for the user.
    Error(String),
}

impl FormValidation {
    fn error(message: &str) -> Self {
        Self::Error(message.to_string())
    }

    /// Returns `true` for [`FormValidation::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Converts a rejection into a [`Error::Validation`] for `field`.
    pub fn into_result(self, field: &'static str) -> Result<()> {
        match self {
            Self::Ok => Ok(()),
            Self::Error(message) => Err(Error::Validation { field, message }),
        }
    }
}

/// One configurable field of a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Key under which the host persists the value.
    pub name: &'static str,
    /// Whether an empty value is rejected.
    pub required: bool,
    /// Help text for the configuration UI.
    pub help: &'static str,
}

/// Configuration schema a host renders for a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepSchema {
    /// Human-readable step name.
    pub display_name: &'static str,
    /// Fields in display order.
    pub fields: Vec<FieldSpec>,
}

/// A step type that can be registered with a host.
pub trait StepDescriptor {
    /// Step instance produced by [`create`](Self::create).
    type Step;

    /// Human-readable step name.
    fn display_name(&self) -> &'static str;

    /// Fields the host should offer.
    fn describe(&self) -> StepSchema;

    /// Validates `config` and builds a runnable step.
    fn create(&self, config: InvocationRequest) -> Result<Self::Step>;
}

/// Descriptor of the NSIS build step and of its installation list.
pub struct NsisDescriptor {
    repository: Arc<dyn InstallationRepository>,
}

impl NsisDescriptor {
    /// Creates a descriptor whose steps read installations from `repository`.
    pub fn new(repository: Arc<dyn InstallationRepository>) -> Self {
        Self { repository }
    }

    /// Rejects an empty script path.
    pub fn check_script(&self, value: &str) -> FormValidation {
        if value.is_empty() {
            return FormValidation::error("Please set a script name");
        }
        FormValidation::Ok
    }

    /// Rejects an empty installation name.
    pub fn check_installation_name(&self, value: &str) -> FormValidation {
        if value.is_empty() {
            return FormValidation::error("Please set a name");
        }
        FormValidation::Ok
    }

    /// Rejects an empty installation home.
    ///
    /// Only administrators may edit installations, so nothing is reported to
    /// anyone else.
    pub fn check_installation_home(&self, value: &str, is_admin: bool) -> FormValidation {
        if !is_admin {
            return FormValidation::Ok;
        }
        if value.is_empty() {
            return FormValidation::error("Please set a path makensis.exe");
        }
        FormValidation::Ok
    }

    /// Returns the configured installations.
    pub fn installations(&self) -> Result<Vec<Installation>> {
        self.repository.list()
    }

    /// Validates and stores a new installation list.
    pub fn set_installations(&self, installations: &[Installation]) -> Result<()> {
        for installation in installations {
            self.check_installation_name(&installation.name)
                .into_result("name")?;
            self.check_installation_home(&installation.home, true)
                .into_result("home")?;
        }
        self.repository.save(installations)
    }
}

impl StepDescriptor for NsisDescriptor {
    type Step = NsisStep;

    fn display_name(&self) -> &'static str {
        "Build installers using NSIS"
    }

    fn describe(&self) -> StepSchema {
        StepSchema {
            display_name: self.display_name(),
            fields: vec![
                FieldSpec {
                    name: "installation",
                    required: false,
                    help: "Name of the NSIS installation; makensis.exe on the PATH when empty",
                },
                FieldSpec {
                    name: "script",
                    required: true,
                    help: "Name or location of the NSIS script file",
                },
                FieldSpec {
                    name: "arguments",
                    required: false,
                    help: "Whitespace separated list of command line arguments",
                },
            ],
        }
    }

    fn create(&self, config: InvocationRequest) -> Result<NsisStep> {
        self.check_script(&config.script).into_result("script")?;
        Ok(NsisStep {
            request: config,
            invoker: Invoker::new(Arc::clone(&self.repository)),
        })
    }
}

/// A configured NSIS build step.
#[derive(Debug, Clone)]
pub struct NsisStep {
    request: InvocationRequest,
    invoker: Invoker,
}

impl NsisStep {
    /// Returns the step's configuration.
    pub fn request(&self) -> &InvocationRequest {
        &self.request
    }

    /// Runs the step once; `true` when makensis exited with 0.
    pub async fn perform(&self, context: &BuildContext, listener: &dyn BuildListener) -> bool {
        self.invoker.run(&self.request, context, listener).await
    }
}
