// src/step/mod.rs

//! The two call sites that drive the external tool.
//!
//! - [`commit_log`]: the parameter "test" action. Runs the commit-log script
//!   in the job workspace and reports the `commit-data` it leaves behind.
//! - [`version_up`]: the build step. Runs the version-up script from the
//!   tool's installation directory.
//!
//! Both follow `BUILDING -> RUNNING -> {SUCCEEDED, FAILED}` exactly once per
//! call, with no retries, and always end in a [`Report`].

pub mod commit_log;
pub mod version_up;

use tracing::{error, info};

pub use commit_log::CommitLogRequest;
pub use version_up::VersionUpRequest;

use crate::command::{CommandBuilder, CommandInvocation};
use crate::config::{ConfigFile, ScriptSpec};
use crate::exec::{CancelSignal, ProcessRunner};
use crate::report::{Report, ResultInterpreter};
use crate::types::EnvVars;

/// Snapshot of the current process environment.
pub fn host_env() -> EnvVars {
    std::env::vars().collect()
}

/// Layer environments left to right; later layers win.
pub fn compose_env(layers: &[&EnvVars]) -> EnvVars {
    let mut env = EnvVars::new();
    for layer in layers {
        env.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    env
}

pub fn command_builder(config: &ConfigFile) -> CommandBuilder {
    CommandBuilder::new(config.tool.program.clone(), config.tool.platform.resolve())
}

pub fn interpreter(config: &ConfigFile, script: &ScriptSpec) -> ResultInterpreter {
    ResultInterpreter::new(config.tool.program.clone(), script.result_file.clone())
        .with_logs(config.report.include_logs)
}

/// Run a built invocation and fold the outcome into a report.
pub async fn execute(
    runner: &dyn ProcessRunner,
    invocation: &CommandInvocation,
    interpreter: &ResultInterpreter,
    cancel: CancelSignal,
) -> Report {
    match runner.run(invocation, cancel).await {
        Ok(result) => {
            let report = interpreter.interpret(&result, invocation).await;
            info!(
                tool = %invocation.program(),
                exit_code = result.exit_code,
                outcome = ?report.outcome,
                "invocation finished"
            );
            report
        }
        Err(err) => {
            error!(tool = %invocation.program(), error = %err, "invocation failed");
            interpreter.interpret_error(&err, invocation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_layers_override_earlier_ones() {
        let mut host = EnvVars::new();
        host.insert("A".to_string(), "host".to_string());
        host.insert("B".to_string(), "host".to_string());
        let mut overrides = EnvVars::new();
        overrides.insert("B".to_string(), "override".to_string());

        let env = compose_env(&[&host, &overrides]);
        assert_eq!(env.get("A").map(String::as_str), Some("host"));
        assert_eq!(env.get("B").map(String::as_str), Some("override"));
    }
}
