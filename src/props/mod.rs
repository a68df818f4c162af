// src/props/mod.rs

//! Property blocks: ordered `KEY=VALUE` pairs destined for `-D` injection.
//!
//! - [`PropertyBlock`] keeps insertion order; the serialized form is one
//!   `KEY=VALUE` line per property, each newline-terminated.
//! - [`SensitiveVars`] names keys whose values must never be shown. Redaction
//!   happens only in [`PropertyBlock::render_redacted`]; the structural
//!   form always carries the real values.
//! - [`expand`] resolves `$VAR` / `${VAR}` references against a build
//!   environment.

pub mod expand;

use std::collections::BTreeSet;
use std::fmt;

pub use expand::expand_vars;

use crate::types::EnvVars;

/// Marker shown in place of a sensitive value.
pub const REDACTED: &str = "********";

/// Property keys understood by the external build scripts.
pub mod keys {
    pub const GIT_SERVER_URL: &str = "GIT_SERVER_URL";
    pub const GIT_SERVER_PORT: &str = "GIT_SERVER_PORT";
    pub const GIT_PROJECT_NAME: &str = "GIT_PROJECT_NAME";
    pub const GIT_BRANCH_NAME: &str = "GIT_BRANCH_NAME";
    pub const PACKAGE_VERSION_RULE: &str = "PACKAGE_VERSION_RULE";
    pub const SINGLE_ID: &str = "SINGLE_ID";
    pub const WORKSPACE: &str = "WORKSPACE";
    pub const CHANGE_DATA: &str = "CHANGE_DATA";
}

/// Ordered key/value pairs. Duplicate keys are kept as appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBlock {
    entries: Vec<(String, String)>,
}

impl PropertyBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as `KEY=VALUE\n` lines in insertion order.
    ///
    /// Values are written verbatim; an empty value yields `KEY=`.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Same layout as [`serialize`](Self::serialize) with every sensitive
    /// value replaced by [`REDACTED`].
    pub fn render_redacted(&self, sensitive: &SensitiveVars) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(sensitive.mask(key, value));
            out.push('\n');
        }
        out
    }

    /// Parse a property string.
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped. Each other
    /// line is split at its first `=`; the key is trimmed, the value kept
    /// verbatim. A line without `=` is a key with an empty value.
    pub fn parse(text: &str) -> Self {
        let mut block = Self::new();
        for line in text.lines() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            match trimmed.split_once('=') {
                Some((key, value)) => block.push(key.trim(), value),
                None => block.push(trimmed.trim_end(), ""),
            }
        }
        block
    }

    /// Copy of this block with `$VAR` / `${VAR}` references in every value
    /// resolved against `env`.
    pub fn expanded(&self, env: &EnvVars) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), expand_vars(v, env)))
                .collect(),
        }
    }
}

impl fmt::Display for PropertyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyBlock
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut block = Self::new();
        for (k, v) in iter {
            block.push(k, v);
        }
        block
    }
}

/// Names of variables whose values must be redacted in any display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensitiveVars {
    names: BTreeSet<String>,
}

impl SensitiveVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// `value`, or [`REDACTED`] when `name` is sensitive.
    pub fn mask<'a>(&self, name: &str, value: &'a str) -> &'a str {
        if self.contains(name) { REDACTED } else { value }
    }
}

impl<S: Into<String>> FromIterator<S> for SensitiveVars {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for SensitiveVars {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}
