// src/exec/process.rs

//! Real process runner backed by `tokio::process`.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::command::CommandInvocation;
use crate::errors::{Result, VersionUpError};
use crate::exec::backend::{ExecutionResult, ProcessRunner};
use crate::exec::cancel::CancelSignal;

/// Runs invocations as OS processes.
///
/// The child gets exactly the invocation's environment (the inherited
/// environment is cleared) and its working directory. Stdout and stderr are
/// streamed line by line to `debug!` and captured in full.
#[derive(Debug, Clone, Default)]
pub struct RealProcessRunner;

impl RealProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for RealProcessRunner {
    fn run<'a>(
        &'a self,
        invocation: &'a CommandInvocation,
        cancel: CancelSignal,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + 'a>> {
        Box::pin(run_process(invocation, cancel))
    }
}

async fn run_process(
    invocation: &CommandInvocation,
    cancel: CancelSignal,
) -> Result<ExecutionResult> {
    let program = invocation.program().to_string();

    info!(
        tool = %program,
        cwd = ?invocation.working_dir(),
        cmd = %invocation.command_line(),
        "starting external process"
    );

    let mut cmd = Command::new(&program);
    cmd.args(invocation.args())
        .current_dir(invocation.working_dir())
        .env_clear()
        .envs(invocation.env())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| VersionUpError::LaunchError {
        program: program.clone(),
        source,
    })?;

    let stdout = child.stdout.take().map(|s| capture(s, "stdout"));
    let stderr = child.stderr.take().map(|s| capture(s, "stderr"));

    // Either the process exits on its own, or the caller cancels the wait.
    let status = tokio::select! {
        status_res = child.wait() => status_res?,

        _ = cancel.fired() => {
            info!(tool = %program, "cancellation requested; killing process");
            if let Err(e) = child.kill().await {
                warn!(tool = %program, error = %e, "failed to kill child process on cancellation");
            }
            return Err(VersionUpError::Interrupted(format!(
                "waiting for '{program}' was cancelled"
            )));
        }
    };

    let stdout = collect(stdout).await?;
    let stderr = collect(stderr).await?;
    let exit_code = status.code().unwrap_or(-1);

    info!(
        tool = %program,
        exit_code,
        success = status.success(),
        "external process exited"
    );

    Ok(ExecutionResult {
        exit_code,
        stdout,
        stderr,
    })
}

/// Drain a child stream on its own task so neither pipe can fill up.
///
/// The stream is read to EOF as raw bytes. Each line is decoded lossily,
/// logged at debug and kept with a trailing `\n`, so output in a legacy
/// encoding never stops the drain.
fn capture<R>(stream: R, name: &'static str) -> JoinHandle<std::io::Result<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        let mut out = String::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
            let line = String::from_utf8_lossy(bytes);
            debug!(stream = name, "{}", line);
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    })
}

async fn collect(handle: Option<JoinHandle<std::io::Result<String>>>) -> Result<String> {
    match handle {
        Some(handle) => {
            let text = handle.await.context("joining output capture task")??;
            Ok(text)
        }
        None => Ok(String::new()),
    }
}
