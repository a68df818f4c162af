// src/exec/backend.rs

//! Pluggable process runner abstraction.
//!
//! Steps talk to a `ProcessRunner` instead of spawning processes directly,
//! so tests can substitute a fake that records invocations and returns
//! scripted results.

use std::future::Future;
use std::pin::Pin;

use crate::command::CommandInvocation;
use crate::errors::Result;
use crate::exec::cancel::CancelSignal;

/// Outcome of a child process that ran to completion.
///
/// A non-zero `exit_code` is not an error at this level; it is reported as
/// is and interpreted later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code, or -1 when the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait abstracting how an invocation is executed.
///
/// Implementations wait until the process terminates or `cancel` fires.
/// Errors are reserved for runner-level faults: launch failure, unreadable
/// output streams, interruption.
pub trait ProcessRunner: Send + Sync {
    fn run<'a>(
        &'a self,
        invocation: &'a CommandInvocation,
        cancel: CancelSignal,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + 'a>>;
}
