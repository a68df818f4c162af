use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Environment variables handed to the external tool, keyed by name.
pub type EnvVars = BTreeMap<String, String>;

/// Command-line quoting convention of the host the tool runs on.
///
/// - `Unix`: arguments are passed verbatim; empty values are fine.
/// - `Windows`: the tool's argument parser rejects a trailing empty `-D`
///   value, so the command builder rewrites it to `KEY=""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn is_unix(self) -> bool {
        matches!(self, Platform::Unix)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Unix => f.write_str("unix"),
            Platform::Windows => f.write_str("windows"),
        }
    }
}

/// Platform selection as written in the config file.
///
/// `Auto` resolves to [`Platform::current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlatformSetting {
    #[default]
    Auto,
    Unix,
    Windows,
}

impl PlatformSetting {
    pub fn resolve(self) -> Platform {
        match self {
            PlatformSetting::Auto => Platform::current(),
            PlatformSetting::Unix => Platform::Unix,
            PlatformSetting::Windows => Platform::Windows,
        }
    }
}

impl FromStr for PlatformSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(PlatformSetting::Auto),
            "unix" => Ok(PlatformSetting::Unix),
            "windows" => Ok(PlatformSetting::Windows),
            other => Err(format!(
                "invalid platform: {other} (expected \"auto\", \"unix\" or \"windows\")"
            )),
        }
    }
}
