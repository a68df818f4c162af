// src/step/commit_log.rs

use std::path::PathBuf;

use crate::command::{CommandInvocation, CommandRequest};
use crate::config::ConfigFile;
use crate::exec::{CancelSignal, ProcessRunner};
use crate::param::GitRepository;
use crate::props::{PropertyBlock, keys};
use crate::report::Report;
use crate::step::{command_builder, compose_env, execute, interpreter};
use crate::types::EnvVars;

/// One commit-log query: which repository, and the job workspace the
/// script writes `commit-data` into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitLogRequest {
    pub repository: GitRepository,
    pub workspace: PathBuf,
}

impl CommitLogRequest {
    pub fn new(repository: GitRepository, workspace: impl Into<PathBuf>) -> Self {
        Self {
            repository,
            workspace: workspace.into(),
        }
    }

    /// `GIT_SERVER_URL`, `GIT_SERVER_PORT`, `GIT_PROJECT_NAME`,
    /// `GIT_BRANCH_NAME`, `WORKSPACE`, in that order. No variable expansion.
    pub fn properties(&self) -> PropertyBlock {
        let repo = &self.repository;
        PropertyBlock::new()
            .with(keys::GIT_SERVER_URL, repo.url.as_str())
            .with(keys::GIT_SERVER_PORT, repo.port.as_str())
            .with(keys::GIT_PROJECT_NAME, repo.path.as_str())
            .with(keys::GIT_BRANCH_NAME, repo.branch.as_str())
            .with(keys::WORKSPACE, self.workspace.to_string_lossy())
    }
}

/// Build the invocation: runs in the workspace with
/// host env + `[env]` + `WORKSPACE`.
pub fn prepare(config: &ConfigFile, request: &CommitLogRequest, host: &EnvVars) -> CommandInvocation {
    let script = config.commit_log_script();
    let properties = request.properties();
    let extra = PropertyBlock::new();

    let mut overrides = EnvVars::new();
    overrides.insert(
        keys::WORKSPACE.to_string(),
        request.workspace.to_string_lossy().into_owned(),
    );
    let env = compose_env(&[host, &config.env, &overrides]);

    command_builder(config).build(
        CommandRequest {
            script: &script.path,
            properties: &properties,
            extra: &extra,
            sensitive: &config.sensitive,
            subcommand: script.subcommand.as_deref(),
        },
        request.workspace.clone(),
        env,
    )
}

/// Run the commit-log script and report the workspace's result file.
pub async fn run(
    config: &ConfigFile,
    request: &CommitLogRequest,
    host: &EnvVars,
    runner: &dyn ProcessRunner,
    cancel: CancelSignal,
) -> Report {
    let invocation = prepare(config, request, host);
    let interp = interpreter(config, &config.commit_log_script());
    execute(runner, &invocation, &interp, cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlatformSetting;

    fn request() -> CommitLogRequest {
        CommitLogRequest::new(
            GitRepository {
                url: "git://h/a".to_string(),
                port: "29418".to_string(),
                path: "proj".to_string(),
                branch: "master".to_string(),
            },
            "/ws/job",
        )
    }

    #[test]
    fn properties_follow_fixed_key_order() {
        assert_eq!(
            request().properties().serialize(),
            "GIT_SERVER_URL=git://h/a\nGIT_SERVER_PORT=29418\nGIT_PROJECT_NAME=proj\nGIT_BRANCH_NAME=master\nWORKSPACE=/ws/job\n"
        );
    }

    #[test]
    fn prepare_targets_workspace_and_ends_with_commit() {
        let mut config = ConfigFile::default();
        config.tool.script_dir = PathBuf::from("/opt/versionup");
        config.tool.platform = PlatformSetting::Unix;

        let inv = prepare(&config, &request(), &EnvVars::new());

        assert_eq!(inv.working_dir(), std::path::Path::new("/ws/job"));
        assert_eq!(inv.program(), "ant");
        assert_eq!(inv.args()[0], "-file");
        assert_eq!(
            PathBuf::from(&inv.args()[1]),
            PathBuf::from("/opt/versionup").join("ant-version.xml")
        );
        assert_eq!(inv.argv().last().map(String::as_str), Some("commit"));
        assert_eq!(inv.env().get("WORKSPACE").map(String::as_str), Some("/ws/job"));
    }

    #[test]
    fn windows_repairs_empty_workspace() {
        let mut config = ConfigFile::default();
        config.tool.platform = PlatformSetting::Windows;
        let mut req = request();
        req.workspace = PathBuf::new();

        let inv = prepare(&config, &req, &EnvVars::new());
        let n = inv.argv().len();
        assert_eq!(inv.argv()[n - 2], "-DWORKSPACE=\"\"");
        assert_eq!(inv.argv()[n - 1], "commit");
    }
}
