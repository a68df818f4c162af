// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::param::GitSourceDefinition;
use crate::props::SensitiveVars;
use crate::types::{EnvVars, PlatformSetting};

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// sensitive = ["GIT_SERVER_URL"]
///
/// [tool]
/// program = "ant"
/// script_dir = "/opt/versionup"
///
/// [commit_log]
/// script = "ant-version.xml"
/// subcommand = "commit"
/// result_file = "commit-data"
///
/// [env]
/// JAVA_HOME = "/usr/lib/jvm/default"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub tool: ToolSection,

    #[serde(default)]
    pub commit_log: CommitLogSection,

    #[serde(default)]
    pub version_up: VersionUpSection,

    #[serde(default)]
    pub report: ReportSection,

    /// Names whose values are redacted in every displayed command line.
    #[serde(default)]
    pub sensitive: Vec<String>,

    /// Environment overrides applied on top of the host environment.
    #[serde(default)]
    pub env: EnvVars,

    /// Git-source parameter definition for the job.
    #[serde(default)]
    pub parameter: Option<GitSourceDefinition>,
}

/// Validated configuration. Built via `ConfigFile::try_from(RawConfigFile)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub tool: ToolSection,
    pub commit_log: CommitLogSection,
    pub version_up: VersionUpSection,
    pub report: ReportSection,
    pub sensitive: SensitiveVars,
    pub env: EnvVars,
    pub parameter: Option<GitSourceDefinition>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            tool: raw.tool,
            commit_log: raw.commit_log,
            version_up: raw.version_up,
            report: raw.report,
            sensitive: raw.sensitive.into_iter().collect(),
            env: raw.env,
            parameter: raw.parameter,
        }
    }

    /// Script descriptor of the commit-log action.
    pub fn commit_log_script(&self) -> ScriptSpec {
        ScriptSpec {
            path: self.tool.script_dir.join(&self.commit_log.script),
            subcommand: Some(self.commit_log.subcommand.clone()),
            result_file: Some(self.commit_log.result_file.clone()),
        }
    }

    /// Script descriptor of the version-up build step.
    pub fn version_up_script(&self) -> ScriptSpec {
        ScriptSpec {
            path: self.tool.script_dir.join(&self.version_up.script),
            subcommand: self.version_up.subcommand.clone(),
            result_file: self.version_up.result_file.clone(),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

/// Resolved script path plus how its run is finished and read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSpec {
    pub path: PathBuf,
    pub subcommand: Option<String>,
    pub result_file: Option<String>,
}

/// `[tool]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolSection {
    /// External tool executable.
    #[serde(default = "default_program")]
    pub program: String,

    /// Installation directory holding the build scripts.
    #[serde(default = "default_script_dir")]
    pub script_dir: PathBuf,

    /// Quoting convention; `auto` follows the host.
    #[serde(default)]
    pub platform: PlatformSetting,
}

fn default_program() -> String {
    "ant".to_string()
}

fn default_script_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ToolSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            script_dir: default_script_dir(),
            platform: PlatformSetting::default(),
        }
    }
}

/// `[commit_log]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitLogSection {
    #[serde(default = "default_commit_log_script")]
    pub script: String,

    #[serde(default = "default_commit_log_subcommand")]
    pub subcommand: String,

    /// File the script writes into the workspace on success.
    #[serde(default = "default_result_file")]
    pub result_file: String,
}

fn default_commit_log_script() -> String {
    "ant-version.xml".to_string()
}

fn default_commit_log_subcommand() -> String {
    "commit".to_string()
}

fn default_result_file() -> String {
    "commit-data".to_string()
}

impl Default for CommitLogSection {
    fn default() -> Self {
        Self {
            script: default_commit_log_script(),
            subcommand: default_commit_log_subcommand(),
            result_file: default_result_file(),
        }
    }
}

/// `[version_up]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionUpSection {
    #[serde(default = "default_version_up_script")]
    pub script: String,

    /// Target passed last on the command line; the script default otherwise.
    #[serde(default)]
    pub subcommand: Option<String>,

    /// If set, read from the script directory after a successful run.
    #[serde(default)]
    pub result_file: Option<String>,
}

fn default_version_up_script() -> String {
    "ant-version-temp.xml".to_string()
}

impl Default for VersionUpSection {
    fn default() -> Self {
        Self {
            script: default_version_up_script(),
            subcommand: None,
            result_file: None,
        }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSection {
    /// Append the command line and stdout after a success report.
    #[serde(default)]
    pub include_logs: bool,
}
