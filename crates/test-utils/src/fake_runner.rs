use std::collections::VecDeque;
use std::fs;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tracing::debug;

use versionup::command::CommandInvocation;
use versionup::errors::{Result, VersionUpError};
use versionup::exec::{CancelSignal, ExecutionResult, ProcessRunner};

/// What the fake does for one invocation.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Exit with this result, optionally writing a file into the working
    /// directory first (as the real script writes `commit-data`).
    Exit {
        result: ExecutionResult,
        writes: Option<(String, String)>,
    },
    /// Fail to launch.
    LaunchError(String),
    /// Wait until cancelled, then report interruption.
    Hang,
}

impl Scripted {
    pub fn exit(code: i32, stdout: &str, stderr: &str) -> Self {
        Scripted::Exit {
            result: ExecutionResult::new(code, stdout, stderr),
            writes: None,
        }
    }

    pub fn exit_writing(code: i32, file: &str, contents: &str) -> Self {
        Scripted::Exit {
            result: ExecutionResult::new(code, "", ""),
            writes: Some((file.to_string(), contents.to_string())),
        }
    }
}

/// A fake runner that:
/// - records every invocation it was handed
/// - plays back scripted outcomes in order (exit 0 once they run out).
#[derive(Debug, Clone, Default)]
pub struct FakeProcessRunner {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    invocations: Arc<Mutex<Vec<CommandInvocation>>>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, outcome: Scripted) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run<'a>(
        &'a self,
        invocation: &'a CommandInvocation,
        cancel: CancelSignal,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + 'a>> {
        debug!(cmd = %invocation.command_line(), "fake runner received invocation");
        self.invocations.lock().unwrap().push(invocation.clone());
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::exit(0, "", ""));

        Box::pin(async move {
            match next {
                Scripted::Exit { result, writes } => {
                    if let Some((name, contents)) = writes {
                        let path = invocation.working_dir().join(&name);
                        fs::write(&path, contents)
                            .with_context(|| format!("writing scripted result file {path:?}"))?;
                    }
                    Ok(result)
                }
                Scripted::LaunchError(msg) => Err(VersionUpError::LaunchError {
                    program: invocation.program().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, msg),
                }),
                Scripted::Hang => {
                    cancel.fired().await;
                    Err(VersionUpError::Interrupted("cancelled".to_string()))
                }
            }
        })
    }
}
