// src/command/quoting.rs

//! Display quoting for command lines.
//!
//! The process itself receives its argv directly; these helpers only render
//! a single human-readable string for logs and failure reports.

use crate::types::Platform;

/// Characters that force single-quoting in a POSIX shell.
const UNIX_META: &[char] = &[
    ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}', '<',
    '>', '|', '&', ';', '#', '~',
];

/// Characters that force double-quoting for `cmd.exe`.
const WINDOWS_META: &[char] = &[' ', '\t', '\n', '&', '|', '<', '>', '^', '(', ')', ','];

/// Quote one argument for a POSIX shell.
///
/// Empty strings become `''`; embedded single quotes become `'\''`.
pub fn quote_unix(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    if !arg.contains(UNIX_META) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', "'\\''"))
}

/// Quote one argument for `cmd.exe`.
///
/// Empty strings become `""`. Arguments with whitespace or shell operators
/// are wrapped in double quotes with embedded quotes doubled. A bare quote
/// pair (as in `-DKEY=""`) does not by itself force quoting.
pub fn quote_windows(arg: &str) -> String {
    if arg.is_empty() {
        return "\"\"".to_string();
    }
    if !arg.contains(WINDOWS_META) {
        return arg.to_string();
    }
    format!("\"{}\"", arg.replace('"', "\"\""))
}

/// Quote and join `args` using the convention of `platform`.
pub fn join(args: &[String], platform: Platform) -> String {
    let quote: fn(&str) -> String = match platform {
        Platform::Unix => quote_unix,
        Platform::Windows => quote_windows,
    };
    args.iter().map(|a| quote(a)).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_plain_args_are_unquoted() {
        assert_eq!(quote_unix("-DGIT_BRANCH_NAME=master"), "-DGIT_BRANCH_NAME=master");
    }

    #[test]
    fn unix_quotes_spaces_and_embedded_quotes() {
        assert_eq!(quote_unix("-DCHANGE_DATA=fix bug"), "'-DCHANGE_DATA=fix bug'");
        assert_eq!(quote_unix("it's"), "'it'\\''s'");
        assert_eq!(quote_unix(""), "''");
    }

    #[test]
    fn windows_quotes_spaces_and_doubles_quotes() {
        assert_eq!(quote_windows("C:\\Program Files\\ant"), "\"C:\\Program Files\\ant\"");
        assert_eq!(quote_windows("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote_windows(""), "\"\"");
    }

    #[test]
    fn windows_leaves_repaired_empty_value_alone() {
        assert_eq!(quote_windows("-DWORKSPACE=\"\""), "-DWORKSPACE=\"\"");
    }

    #[test]
    fn join_uses_platform_convention() {
        let args = vec!["ant".to_string(), "a b".to_string()];
        assert_eq!(join(&args, Platform::Unix), "ant 'a b'");
        assert_eq!(join(&args, Platform::Windows), "ant \"a b\"");
    }
}
