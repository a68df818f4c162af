// src/step/version_up.rs

use std::path::PathBuf;

use tracing::debug;

use crate::command::{CommandInvocation, CommandRequest};
use crate::config::ConfigFile;
use crate::exec::{CancelSignal, ProcessRunner};
use crate::param::GitSourceValue;
use crate::props::{PropertyBlock, SensitiveVars, keys};
use crate::report::Report;
use crate::step::{command_builder, compose_env, execute, interpreter};
use crate::types::EnvVars;

/// Inputs of the version-up build step for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionUpRequest {
    /// Selected git-source parameter value.
    pub parameter: GitSourceValue,
    pub package_version_rule: String,
    pub single_id: String,
    /// Raw change-log text, passed as `CHANGE_DATA`.
    pub change_log: Option<String>,
    pub workspace: PathBuf,
    /// Build-specific sensitive names, on top of the configured ones.
    pub sensitive: SensitiveVars,
}

impl VersionUpRequest {
    pub fn new(parameter: GitSourceValue, workspace: impl Into<PathBuf>) -> Self {
        Self {
            parameter,
            package_version_rule: String::new(),
            single_id: String::new(),
            change_log: None,
            workspace: workspace.into(),
            sensitive: SensitiveVars::new(),
        }
    }

    /// Build environment: host, then the parameter's exported variables,
    /// then `[env]`, then `WORKSPACE` and `CHANGE_DATA`.
    pub fn environment(&self, config: &ConfigFile, host: &EnvVars) -> EnvVars {
        let mut parameter_env = EnvVars::new();
        self.parameter.build_environment(&mut parameter_env);

        let mut overrides = EnvVars::new();
        overrides.insert(
            keys::WORKSPACE.to_string(),
            self.workspace.to_string_lossy().into_owned(),
        );
        if let Some(change_log) = &self.change_log {
            overrides.insert(keys::CHANGE_DATA.to_string(), change_log.clone());
        }

        compose_env(&[host, &parameter_env, &config.env, &overrides])
    }

    /// Generated `-D` block, before variable expansion.
    pub fn properties(&self) -> PropertyBlock {
        let repo = &self.parameter.repository;
        PropertyBlock::new()
            .with(keys::GIT_SERVER_URL, repo.url.as_str())
            .with(keys::GIT_SERVER_PORT, repo.port.as_str())
            .with(keys::GIT_PROJECT_NAME, repo.path.as_str())
            .with(keys::GIT_BRANCH_NAME, repo.branch.as_str())
            .with(keys::PACKAGE_VERSION_RULE, self.package_version_rule.as_str())
            .with(keys::SINGLE_ID, self.single_id.as_str())
            .with(keys::WORKSPACE, self.workspace.to_string_lossy())
    }

    /// Free-form arguments after the generated block: `CHANGE_DATA`, raw.
    pub fn extra_properties(&self) -> PropertyBlock {
        match &self.change_log {
            Some(change_log) => PropertyBlock::new().with(keys::CHANGE_DATA, change_log.as_str()),
            None => PropertyBlock::new(),
        }
    }
}

/// Build the invocation: runs in the tool's script directory, with property
/// values expanded against the build environment.
pub fn prepare(config: &ConfigFile, request: &VersionUpRequest, host: &EnvVars) -> CommandInvocation {
    let script = config.version_up_script();
    let env = request.environment(config, host);
    let properties = request.properties().expanded(&env);
    let extra = request.extra_properties();

    let mut sensitive = config.sensitive.clone();
    sensitive.extend(request.sensitive.iter());

    debug!(
        properties = %properties.render_redacted(&sensitive),
        "version-up properties"
    );

    command_builder(config).build(
        CommandRequest {
            script: &script.path,
            properties: &properties,
            extra: &extra,
            sensitive: &sensitive,
            subcommand: script.subcommand.as_deref(),
        },
        config.tool.script_dir.clone(),
        env,
    )
}

/// Run the version-up script for one build.
pub async fn run(
    config: &ConfigFile,
    request: &VersionUpRequest,
    host: &EnvVars,
    runner: &dyn ProcessRunner,
    cancel: CancelSignal,
) -> Report {
    let invocation = prepare(config, request, host);
    let interp = interpreter(config, &config.version_up_script());
    execute(runner, &invocation, &interp, cancel).await
}
