// src/logging.rs

//! Logging setup for `versionup` using `tracing` + `tracing-subscriber`.
//!
//! The filter is chosen in this order:
//! 1. `--log-level` CLI flag, applied to every target
//! 2. `VERSIONUP_LOG`, a full `EnvFilter` directive string such as
//!    `info` or `warn,versionup::exec=debug`
//! 3. `info`
//!
//! An unparsable `VERSIONUP_LOG` falls back to `info` with a warning once the
//! subscriber is up. Logs go to STDERR so stdout carries only the report.

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "VERSIONUP_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let directive = filter_directive(cli_level, env_value.as_deref());

    let (filter, rejected) = match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_DIRECTIVE), Some((directive.to_string(), e))),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    if let Some((directive, error)) = rejected {
        warn!(%directive, %error, "ignoring invalid {LOG_ENV_VAR}");
    }
    Ok(())
}

/// Filter directive for the given flag and `VERSIONUP_LOG` value.
fn filter_directive(cli_level: Option<LogLevel>, env_value: Option<&str>) -> &str {
    if let Some(level) = cli_level {
        return level_directive(level);
    }
    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => DEFAULT_DIRECTIVE,
    }
}

fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
