#![allow(dead_code)]

use std::path::Path;

use versionup::config::{ConfigFile, RawConfigFile};
use versionup::param::GitSourceDefinition;
use versionup::types::PlatformSetting;

/// Builder for `ConfigFile` to simplify test setup.
///
/// Defaults to the unix quoting convention so results do not depend on the
/// host running the tests.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        let mut config = RawConfigFile::default();
        config.tool.platform = PlatformSetting::Unix;
        Self { config }
    }

    pub fn program(mut self, program: &str) -> Self {
        self.config.tool.program = program.to_string();
        self
    }

    pub fn script_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.tool.script_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn windows(mut self) -> Self {
        self.config.tool.platform = PlatformSetting::Windows;
        self
    }

    pub fn sensitive(mut self, name: &str) -> Self {
        self.config.sensitive.push(name.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.config.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn include_logs(mut self, val: bool) -> Self {
        self.config.report.include_logs = val;
        self
    }

    pub fn version_up_result_file(mut self, name: &str) -> Self {
        self.config.version_up.result_file = Some(name.to_string());
        self
    }

    pub fn parameter(mut self, url: &str, port: &str, path: &str, branch: &str) -> Self {
        self.config.parameter = Some(GitSourceDefinition::new("GIT_SOURCE", url, port, path, branch));
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
