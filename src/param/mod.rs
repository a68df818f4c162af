// src/param/mod.rs

//! Parameter model.
//!
//! Raw job parameters are plain strings; any of them may be multi-line, in
//! which case each line is one scalar value. Parallel multi-line fields
//! (url/port/path/branch) are positionally aligned: line *n* of each field
//! describes the same repository.
//!
//! - [`ParameterSet`] is the ordered name -> raw value mapping.
//! - [`git_source`] holds the git-source parameter definition and the value
//!   a build receives once one repository has been selected.

pub mod git_source;

pub use git_source::{GitRepository, GitSourceDefinition, GitSourceValue};

/// Split a raw multi-line field into its ordered lines.
///
/// Empty lines are kept as empty strings and an empty input yields a single
/// empty entry. A trailing `\r` (CRLF form input) is dropped from each line;
/// nothing else is validated.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Ordered mapping from parameter name to raw string value.
///
/// Insertion order is kept; setting an existing name replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, String)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `name`, or the empty string when it was never set.
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// The lines of a (possibly multi-line) parameter.
    pub fn values(&self, name: &str) -> Vec<String> {
        split_lines(self.get_or_empty(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_empty_lines() {
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
    }

    #[test]
    fn split_of_empty_string_is_single_empty_entry() {
        assert_eq!(split_lines(""), vec![String::new()]);
    }

    #[test]
    fn split_drops_carriage_returns() {
        assert_eq!(split_lines("u1\r\nu2"), vec!["u1", "u2"]);
    }

    #[test]
    fn parameter_set_replaces_in_place() {
        let params = ParameterSet::new()
            .with("url", "git://h/a")
            .with("port", "29418")
            .with("url", "git://h/b");

        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["url", "port"]);
        assert_eq!(params.get("url"), Some("git://h/b"));
        assert_eq!(params.get_or_empty("branch"), "");
    }

    #[test]
    fn values_splits_multi_line_parameter() {
        let params = ParameterSet::new().with("gitUrl", "u1\nu2");
        assert_eq!(params.values("gitUrl"), vec!["u1", "u2"]);
        assert_eq!(params.values("missing"), vec![""]);
    }
}
