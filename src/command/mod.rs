// src/command/mod.rs

//! Command construction for the external build tool.
//!
//! - [`builder`] turns a property block into the argv
//!   `[tool, "-file", script, -D..., extra -D..., subcommand]`.
//! - [`quoting`] renders an argv as one display string per platform.
//!
//! A [`CommandInvocation`] is immutable once built and carries, next to the
//! real argv, a parallel display argv in which sensitive values are masked.

pub mod builder;
pub mod quoting;

use std::path::{Path, PathBuf};

pub use builder::{CommandBuilder, CommandRequest};

use crate::types::{EnvVars, Platform};

/// Complete description of one external process execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    argv: Vec<String>,
    display: Vec<String>,
    working_dir: PathBuf,
    env: EnvVars,
    platform: Platform,
}

impl CommandInvocation {
    pub(crate) fn new(
        argv: Vec<String>,
        display: Vec<String>,
        working_dir: PathBuf,
        env: EnvVars,
        platform: Platform,
    ) -> Self {
        debug_assert_eq!(argv.len(), display.len());
        Self {
            argv,
            display,
            working_dir,
            env,
            platform,
        }
    }

    /// Full argument vector, program first. Carries real values.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    /// Argument vector with sensitive values replaced by the redaction marker.
    pub fn redacted_argv(&self) -> &[String] {
        &self.display
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn env(&self) -> &EnvVars {
        &self.env
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Redacted command line quoted for the invocation's platform.
    ///
    /// This is the only form of the command that may be logged or shown.
    pub fn command_line(&self) -> String {
        quoting::join(&self.display, self.platform)
    }
}
