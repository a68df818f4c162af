// src/props/expand.rs

//! `$VAR` / `${VAR}` expansion against a build environment.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::types::EnvVars;

static VAR_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_.]+)\}|\$([A-Za-z0-9_]+)").expect("variable pattern is valid")
});

/// Replace every `$NAME` and `${NAME}` whose name is present in `env`.
///
/// References to unknown variables are left exactly as written.
pub fn expand_vars(value: &str, env: &EnvVars) -> String {
    if !value.contains('$') {
        return value.to_string();
    }

    VAR_REF
        .replace_all(value, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match env.get(name) {
                Some(resolved) => resolved.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
