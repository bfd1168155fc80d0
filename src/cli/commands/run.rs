//! `nsis-step run`: compile one script.

use crate::cli::{OutputManager, RunArgs};
use crate::error::Result;
use crate::step::{BuildContext, InvocationRequest, MemoryRepository, NsisDescriptor, StepDescriptor, VariableMap};
use path_absolutize::Absolutize;
use std::path::Path;
use std::sync::Arc;

/// Runs the step described by `args` and returns the process exit code.
///
/// Exit code 0 means makensis exited with 0; every other outcome is 1.
pub async fn run_step(args: &RunArgs, config_path: &Path, output: &OutputManager) -> Result<i32> {
    let config = crate::config::load(config_path)?;

    let descriptor = NsisDescriptor::new(Arc::new(MemoryRepository::new(config.installations)));
    let step = descriptor.create(InvocationRequest {
        installation: args.installation.clone(),
        script: args.script.clone(),
        arguments: args.arguments.clone(),
    })?;

    let mut node = config.node;
    if args.windows {
        node.unix = false;
    }

    let module_root = match &args.workdir {
        Some(dir) => dir.absolutize()?.into_owned(),
        None => std::env::current_dir()?,
    };

    let context = BuildContext::new(node, module_root)
        .environment(environment(&args.environment))
        .build_variables(args.variables.iter().cloned().collect());

    let _ = output.info(&format!(
        "{} on node {} in {}",
        descriptor.display_name(),
        context.node.name,
        context.module_root.display()
    ));

    if step.perform(&context, output).await {
        let _ = output.success("makensis finished successfully");
        Ok(0)
    } else {
        let _ = output.warn("makensis failed");
        Ok(1)
    }
}

/// Process environment with `overrides` applied on top.
fn environment(overrides: &[(String, String)]) -> VariableMap {
    let mut env: VariableMap = std::env::vars().collect();
    env.extend(overrides.iter().cloned());
    env
}
