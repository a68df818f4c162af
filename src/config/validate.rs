// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, VersionUpError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = VersionUpError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_tool(cfg)?;
    validate_scripts(cfg)?;
    validate_sensitive(cfg)?;
    Ok(())
}

fn validate_tool(cfg: &RawConfigFile) -> Result<()> {
    if cfg.tool.program.trim().is_empty() {
        return Err(VersionUpError::ConfigError(
            "[tool].program must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_scripts(cfg: &RawConfigFile) -> Result<()> {
    ensure_non_empty("[commit_log].script", &cfg.commit_log.script)?;
    ensure_non_empty("[commit_log].subcommand", &cfg.commit_log.subcommand)?;
    ensure_bare_file_name("[commit_log].result_file", &cfg.commit_log.result_file)?;

    ensure_non_empty("[version_up].script", &cfg.version_up.script)?;
    if let Some(subcommand) = &cfg.version_up.subcommand {
        ensure_non_empty("[version_up].subcommand", subcommand)?;
    }
    if let Some(result_file) = &cfg.version_up.result_file {
        ensure_bare_file_name("[version_up].result_file", result_file)?;
    }
    Ok(())
}

fn validate_sensitive(cfg: &RawConfigFile) -> Result<()> {
    if cfg.sensitive.iter().any(|name| name.trim().is_empty()) {
        return Err(VersionUpError::ConfigError(
            "`sensitive` entries must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn ensure_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VersionUpError::ConfigError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

/// Result files live directly in the working directory.
fn ensure_bare_file_name(field: &str, value: &str) -> Result<()> {
    ensure_non_empty(field, value)?;
    if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
        return Err(VersionUpError::ConfigError(format!(
            "{field} must be a bare file name (got '{value}')"
        )));
    }
    Ok(())
}
