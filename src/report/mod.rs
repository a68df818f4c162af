// src/report/mod.rs

//! Turning an execution outcome into the single text report shown to users.
//!
//! Success with a result file:
//!
//! ```text
//! [Commit Logs]
//! <result file contents>
//! [END]
//! ```
//!
//! Failure:
//!
//! ```text
//! <tool> build failed(<exit code>)
//! command:<redacted command line>
//! <stdout>
//! <stderr>
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::command::CommandInvocation;
use crate::errors::{Result, VersionUpError};
use crate::exec::ExecutionResult;

pub const RESULT_HEADER: &str = "[Commit Logs]\n";
pub const LOGS_HEADER: &str = "[Logs]\n";
pub const END_MARKER: &str = "\n[END]\n";

/// Terminal state of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    /// The tool ran and exited non-zero.
    ToolFailed(i32),
    /// The tool exited 0 but its result file could not be read.
    ResultUnreadable,
    LaunchFailed,
    Interrupted,
    /// Any other runner fault (e.g. unreadable output stream).
    RunnerFault,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Human-readable result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub outcome: Outcome,
    pub text: String,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Folds execution results into [`Report`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultInterpreter {
    tool: String,
    result_file: Option<String>,
    include_logs: bool,
}

impl ResultInterpreter {
    /// `result_file` is a bare file name looked up in the invocation's
    /// working directory. With `None`, a successful run reports its stdout.
    pub fn new(tool: impl Into<String>, result_file: Option<String>) -> Self {
        Self {
            tool: tool.into(),
            result_file,
            include_logs: false,
        }
    }

    /// Also append the command line and stdout after a success report.
    pub fn with_logs(mut self, include_logs: bool) -> Self {
        self.include_logs = include_logs;
        self
    }

    pub fn result_path(&self, working_dir: &Path) -> Option<PathBuf> {
        self.result_file.as_ref().map(|name| working_dir.join(name))
    }

    /// Report for a process that ran to completion.
    pub async fn interpret(
        &self,
        result: &ExecutionResult,
        invocation: &CommandInvocation,
    ) -> Report {
        if !result.success() {
            return self.failure_report(result, invocation);
        }

        let body = match self.read_result(invocation.working_dir()).await {
            Ok(Some(contents)) => format!("{RESULT_HEADER}{contents}{END_MARKER}"),
            Ok(None) => format!("{LOGS_HEADER}{}{END_MARKER}", result.stdout),
            Err(err) => {
                warn!(error = %err, "tool succeeded but result file is unreadable");
                return Report {
                    outcome: Outcome::ResultUnreadable,
                    text: format!(
                        "{} build succeeded but {err}\ncommand:{}\n{}",
                        self.tool,
                        invocation.command_line(),
                        result.stdout
                    ),
                };
            }
        };

        let mut text = body;
        if self.include_logs && self.result_file.is_some() {
            text.push_str(LOGS_HEADER);
            text.push_str("command:");
            text.push_str(&invocation.command_line());
            text.push('\n');
            text.push_str(&result.stdout);
            text.push_str(END_MARKER);
        }

        debug!(tool = %self.tool, "build succeeded");
        Report {
            outcome: Outcome::Succeeded,
            text,
        }
    }

    /// Report for a runner-level fault (no exit code available).
    pub fn interpret_error(&self, err: &VersionUpError, invocation: &CommandInvocation) -> Report {
        let (outcome, headline) = match err {
            VersionUpError::LaunchError { .. } => (Outcome::LaunchFailed, "could not be started"),
            VersionUpError::Interrupted(_) => (Outcome::Interrupted, "was interrupted"),
            _ => (Outcome::RunnerFault, "failed to run"),
        };
        Report {
            outcome,
            text: format!(
                "{} build {headline}: {err}\ncommand:{}\n",
                self.tool,
                invocation.command_line()
            ),
        }
    }

    /// Read the configured result file from `working_dir`.
    ///
    /// The contents are opaque text: bytes that are not UTF-8 are replaced,
    /// never rejected. A missing or unreadable file is an error, never an
    /// empty report.
    pub async fn read_result(&self, working_dir: &Path) -> Result<Option<String>> {
        let Some(path) = self.result_path(working_dir) else {
            return Ok(None);
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(source) => Err(VersionUpError::ResultFileError { path, source }),
        }
    }

    fn failure_report(&self, result: &ExecutionResult, invocation: &CommandInvocation) -> Report {
        Report {
            outcome: Outcome::ToolFailed(result.exit_code),
            text: format!(
                "{} build failed({})\ncommand:{}\n{}\n{}",
                self.tool,
                result.exit_code,
                invocation.command_line(),
                result.stdout,
                result.stderr
            ),
        }
    }
}
