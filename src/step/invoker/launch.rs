//! Child process execution with live output forwarding.

use crate::step::{
    error::{Error, Result},
    listener::BuildListener,
    settings::BuildContext,
    utils::ArgumentList,
};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Runs `args` and waits for the process to exit.
///
/// The build environment is layered over the inherited one, the working
/// directory is the module root, and stdout/stderr are forwarded line by
/// line to `listener` as they arrive. There is no timeout.
pub(super) async fn launch(
    args: &ArgumentList,
    context: &BuildContext,
    listener: &dyn BuildListener,
) -> Result<ExitStatus> {
    let Some((program, rest)) = args.split_program() else {
        crate::bail!("empty command line");
    };

    let mut child = Command::new(program)
        .args(rest)
        .envs(&context.environment)
        .current_dir(&context.module_root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| Error::CommandFailed {
            command: args.to_string_with_quote(),
            error,
        })?;

    log::debug!("Spawned {} (pid {:?})", program, child.id());

    // Both pipes are drained before waiting so a chatty compiler never blocks.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    tokio::join!(forward(stdout, listener), forward(stderr, listener));

    child.wait().await.map_err(|error| Error::CommandFailed {
        command: args.to_string_with_quote(),
        error,
    })
}

/// Copies lines from `stream` to `listener` until EOF.
///
/// Output that is not UTF-8 is converted lossily rather than dropped.
async fn forward<R>(stream: Option<R>, listener: &dyn BuildListener)
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return;
    };

    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                listener.println(line.trim_end_matches(['\r', '\n']));
            }
            Err(e) => {
                log::warn!("Stopped reading compiler output: {}", e);
                break;
            }
        }
    }
}
