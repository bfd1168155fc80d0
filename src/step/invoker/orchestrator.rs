//! The NSIS invoker: installation resolution, command assembly and execution.

use super::{DEFAULT_EXECUTABLE, launch::launch, tool_detection::DEFAULT_ON_PATH};
use crate::step::{
    error::{Error, Result},
    listener::BuildListener,
    settings::{BuildContext, InstallationRepository, InvocationRequest},
    utils::{ArgumentList, expand},
};
use std::sync::Arc;

/// Leading tokens that run the command through the Windows shell.
const WINDOWS_SHELL_PREFIX: [&str; 2] = ["cmd.exe", "/C"];

/// Trailing tokens that make `cmd.exe` exit with the compiler's exit code.
const WINDOWS_SHELL_SUFFIX: [&str; 3] = ["&&", "exit", "%%ERRORLEVEL%%"];

/// Runs `makensis` for one build step.
///
/// The invoker only reads the installation list; editing it is the job of
/// the repository's owner.
///
/// # Examples
///
/// ```no_run
/// use nsis_step::step::{
///     BufferListener, BuildContext, Installation, InvocationRequest, Invoker,
///     MemoryRepository, NodeContext,
/// };
/// use std::sync::Arc;
///
/// # async fn example() {
/// let repository = Arc::new(MemoryRepository::new(vec![
///     Installation::new("v3", "/usr/bin/makensis"),
/// ]));
/// let invoker = Invoker::new(repository);
///
/// let request = InvocationRequest::new("installer.nsi")
///     .installation("v3")
///     .arguments("/V3");
/// let context = BuildContext::new(NodeContext::local(), ".");
/// let listener = BufferListener::new();
///
/// let success = invoker.run(&request, &context, &listener).await;
/// println!("{}", listener.text());
/// # let _ = success;
/// # }
/// ```
#[derive(Clone)]
pub struct Invoker {
    repository: Arc<dyn InstallationRepository>,
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker")
            .field("repository", &"<InstallationRepository>")
            .finish()
    }
}

impl Invoker {
    /// Creates an invoker reading installations from `repository`.
    pub fn new(repository: Arc<dyn InstallationRepository>) -> Self {
        Self { repository }
    }

    /// Runs the compiler for `request` and reports whether it exited with 0.
    ///
    /// Never fails: every problem is written to `listener` (fatal channel for
    /// everything except a non-zero exit code) and yields `false`.
    pub async fn run(
        &self,
        request: &InvocationRequest,
        context: &BuildContext,
        listener: &dyn BuildListener,
    ) -> bool {
        match self.execute(request, context, listener).await {
            Ok(success) => success,
            Err(e) => {
                report(&e, listener);
                false
            }
        }
    }

    async fn execute(
        &self,
        request: &InvocationRequest,
        context: &BuildContext,
        listener: &dyn BuildListener,
    ) -> Result<bool> {
        let executable = self.resolve_executable(request, context, listener).await?;
        let args = command_line(&executable, request, context);

        listener.println(&format!("Executing command: {}", args.to_string_with_quote()));

        let status = launch(&args, context, listener).await?;
        log::info!("{} finished with {}", executable, status);

        Ok(status.code() == Some(0))
    }

    /// Resolves the executable for `request` on the context's node.
    ///
    /// Without a matching installation the bare default name is returned and
    /// nothing is checked. Otherwise the installation is specialized for the
    /// node and environment, and its home must exist.
    pub async fn resolve_executable(
        &self,
        request: &InvocationRequest,
        context: &BuildContext,
        listener: &dyn BuildListener,
    ) -> Result<String> {
        let Some(installation) = self.repository.find(request.installation.as_deref())? else {
            if let Some(name) = &request.installation {
                log::warn!(
                    "No NSIS installation named {:?}, falling back to {} on PATH",
                    name,
                    DEFAULT_EXECUTABLE
                );
            }
            if DEFAULT_ON_PATH.is_none() {
                log::warn!("{} is not on the PATH of this machine", DEFAULT_EXECUTABLE);
            }
            listener.println(&format!("Path To makensis.exe: {}", DEFAULT_EXECUTABLE));
            return Ok(DEFAULT_EXECUTABLE.to_string());
        };

        let home = installation
            .resolve(&context.node, &context.environment)
            .home;

        match tokio::fs::try_exists(&home).await {
            Ok(true) => {}
            Ok(false) => return Err(Error::ExecutableMissing { path: home }),
            Err(error) => return Err(Error::ExistenceCheck { path: home, error }),
        }

        listener.println(&format!("Path To makensis.exe: {}", home));
        Ok(home)
    }
}

/// Assembles the full argument vector for `executable`.
///
/// The free-form arguments are normalized, expanded and split; the script is
/// normalized and expanded but always stays one argument. Non-Unix nodes get
/// the `cmd.exe /C ... && exit %%ERRORLEVEL%%` wrapper.
pub fn command_line(
    executable: &str,
    request: &InvocationRequest,
    context: &BuildContext,
) -> ArgumentList {
    let mut args = ArgumentList::new();
    args.add(executable);

    let arguments = expand(
        &request.arguments,
        &context.environment,
        &context.build_variables,
    );
    if !arguments.trim().is_empty() {
        args.add_tokenized(&arguments);
    }

    let script = expand(&request.script, &context.environment, &context.build_variables);
    if !script.is_empty() {
        args.add(script);
    }

    if !context.is_unix() {
        args.prepend(WINDOWS_SHELL_PREFIX);
        args.add_all(WINDOWS_SHELL_SUFFIX);
    }

    args
}

/// Writes the diagnostic for `error` to the listener's fatal channel.
fn report(error: &Error, listener: &dyn BuildListener) {
    log::error!("NSIS step failed: {}", error);

    match error {
        Error::CommandFailed { error: io, .. } => {
            if io.kind() == std::io::ErrorKind::NotFound {
                listener.println(
                    "The compiler could not be started. Check the installation path or \
                     that makensis is on the PATH of the build environment.",
                );
            }
            listener.println(&error.to_string());
            listener.fatal_error(&format!("command execution failed: {}", io));
        }
        Error::ExecutableMissing { .. } | Error::ExistenceCheck { .. } => {
            listener.fatal_error(&error.to_string());
        }
        other => listener.fatal_error(&format!("NSIS step failed: {}", other)),
    }
}
