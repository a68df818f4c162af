// src/command/builder.rs

use std::path::{Path, PathBuf};

use crate::command::CommandInvocation;
use crate::props::{PropertyBlock, REDACTED, SensitiveVars};
use crate::types::{EnvVars, Platform};

/// Inputs for one command line.
///
/// `properties` become the generated `-D` block. `extra` properties are
/// appended after it verbatim and are never subject to the empty-value
/// repair. `subcommand`, when set, is always the last argument.
#[derive(Debug, Clone, Copy)]
pub struct CommandRequest<'a> {
    pub script: &'a Path,
    pub properties: &'a PropertyBlock,
    pub extra: &'a PropertyBlock,
    pub sensitive: &'a SensitiveVars,
    pub subcommand: Option<&'a str>,
}

/// Builds [`CommandInvocation`]s for a fixed tool on a fixed platform.
///
/// Holds no mutable state; building twice from the same inputs yields
/// identical invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    tool: String,
    platform: Platform,
}

impl CommandBuilder {
    pub fn new(tool: impl Into<String>, platform: Platform) -> Self {
        Self {
            tool: tool.into(),
            platform,
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Assemble the argv for `request`, to run in `working_dir` with `env`.
    pub fn build(
        &self,
        request: CommandRequest<'_>,
        working_dir: impl Into<PathBuf>,
        env: EnvVars,
    ) -> CommandInvocation {
        let mut argv = Vec::new();
        let mut display = Vec::new();

        let script = request.script.to_string_lossy().into_owned();
        for fixed in [self.tool.clone(), "-file".to_string(), script] {
            display.push(fixed.clone());
            argv.push(fixed);
        }

        let generated_start = argv.len();
        for (key, value) in request.properties.iter() {
            argv.push(define(key, value));
            display.push(define(key, request.sensitive.mask(key, value)));
        }

        if !self.platform.is_unix() {
            repair_trailing_empty_value(
                request.properties,
                request.sensitive,
                &mut argv[generated_start..],
                &mut display[generated_start..],
            );
        }

        for (key, value) in request.extra.iter() {
            argv.push(define(key, value));
            display.push(define(key, request.sensitive.mask(key, value)));
        }

        if let Some(subcommand) = request.subcommand {
            argv.push(subcommand.to_string());
            display.push(subcommand.to_string());
        }

        CommandInvocation::new(argv, display, working_dir.into(), env, self.platform)
    }
}

fn define(key: &str, value: &str) -> String {
    format!("-D{key}={value}")
}

/// Rewrite the last generated `-DKEY=` into `-DKEY=""`.
///
/// Only the final property is inspected; earlier empty values are passed on
/// as `-DKEY=` unchanged.
fn repair_trailing_empty_value(
    properties: &PropertyBlock,
    sensitive: &SensitiveVars,
    argv: &mut [String],
    display: &mut [String],
) {
    let Some((key, value)) = properties.iter().last() else {
        return;
    };
    if !value.is_empty() {
        return;
    }

    let repaired = format!("-D{key}=\"\"");
    if let Some(last) = argv.last_mut() {
        *last = repaired.clone();
    }
    if let Some(last) = display.last_mut() {
        *last = if sensitive.contains(key) {
            define(key, REDACTED)
        } else {
            repaired
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(pairs: &[(&str, &str)]) -> PropertyBlock {
        pairs.iter().copied().collect()
    }

    fn build(platform: Platform, props: &PropertyBlock, subcommand: Option<&str>) -> Vec<String> {
        let extra = PropertyBlock::new();
        let sensitive = SensitiveVars::new();
        let request = CommandRequest {
            script: Path::new("/opt/tool/ant-version.xml"),
            properties: props,
            extra: &extra,
            sensitive: &sensitive,
            subcommand,
        };
        CommandBuilder::new("ant", platform)
            .build(request, "/tmp", EnvVars::new())
            .argv()
            .to_vec()
    }

    #[test]
    fn layout_is_tool_file_script_defines_subcommand() {
        let props = block(&[("A", "1"), ("B", "2")]);
        assert_eq!(
            build(Platform::Unix, &props, Some("commit")),
            vec!["ant", "-file", "/opt/tool/ant-version.xml", "-DA=1", "-DB=2", "commit"]
        );
    }

    #[test]
    fn unix_never_repairs_empty_values() {
        let props = block(&[("A", ""), ("B", "")]);
        let argv = build(Platform::Unix, &props, None);
        assert_eq!(&argv[3..], &["-DA=", "-DB="]);
    }

    #[test]
    fn windows_repairs_only_the_trailing_empty_value() {
        let props = block(&[("A", ""), ("B", "x"), ("C", "")]);
        let argv = build(Platform::Windows, &props, Some("commit"));
        assert_eq!(&argv[3..], &["-DA=", "-DB=x", "-DC=\"\"", "commit"]);
    }

    #[test]
    fn windows_leaves_value_ending_in_equals_alone() {
        let props = block(&[("A", "b=")]);
        let argv = build(Platform::Windows, &props, None);
        assert_eq!(argv.last().map(String::as_str), Some("-DA=b="));
    }

    #[test]
    fn windows_with_empty_block_is_untouched() {
        let argv = build(Platform::Windows, &PropertyBlock::new(), Some("commit"));
        assert_eq!(argv, vec!["ant", "-file", "/opt/tool/ant-version.xml", "commit"]);
    }

    #[test]
    fn extra_properties_follow_block_and_are_not_repaired() {
        let props = block(&[("A", "1")]);
        let extra = block(&[("CHANGE_DATA", "")]);
        let sensitive = SensitiveVars::new();
        let request = CommandRequest {
            script: Path::new("s.xml"),
            properties: &props,
            extra: &extra,
            sensitive: &sensitive,
            subcommand: Some("commit"),
        };
        let inv = CommandBuilder::new("ant", Platform::Windows).build(request, ".", EnvVars::new());
        assert_eq!(&inv.argv()[3..], &["-DA=1", "-DCHANGE_DATA=", "commit"]);
    }

    #[test]
    fn sensitive_values_are_masked_only_in_display() {
        let props = block(&[("USER", "bob"), ("TOKEN", "s3cret")]);
        let extra = PropertyBlock::new();
        let sensitive: SensitiveVars = ["TOKEN"].into_iter().collect();
        let request = CommandRequest {
            script: Path::new("s.xml"),
            properties: &props,
            extra: &extra,
            sensitive: &sensitive,
            subcommand: None,
        };
        let inv = CommandBuilder::new("ant", Platform::Unix).build(request, ".", EnvVars::new());

        assert!(inv.argv().contains(&"-DTOKEN=s3cret".to_string()));
        assert!(inv.redacted_argv().contains(&"-DTOKEN=********".to_string()));
        assert!(!inv.command_line().contains("s3cret"));
    }

    #[test]
    fn building_twice_is_identical() {
        let props = block(&[("A", "1"), ("B", "")]);
        assert_eq!(
            build(Platform::Windows, &props, Some("commit")),
            build(Platform::Windows, &props, Some("commit"))
        );
    }
}
