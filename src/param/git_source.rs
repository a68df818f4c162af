// src/param/git_source.rs

use serde::Deserialize;

use crate::param::{ParameterSet, split_lines};
use crate::types::EnvVars;

/// Git-source parameter as declared on a job.
///
/// Each field is a newline-delimited list; the lists are positionally
/// aligned. Mirrors the `[parameter]` config section:
///
/// ```toml
/// [parameter]
/// name = "GIT_SOURCE"
/// git_url = "git://h/a\ngit://h/b"
/// git_port = "29418\n29418"
/// git_path = "proj-a\nproj-b"
/// git_branch = "master\ntizen"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GitSourceDefinition {
    #[serde(default = "default_parameter_name")]
    pub name: String,
    #[serde(default)]
    pub git_url: String,
    #[serde(default)]
    pub git_port: String,
    #[serde(default)]
    pub git_path: String,
    #[serde(default)]
    pub git_branch: String,
}

fn default_parameter_name() -> String {
    "GIT_SOURCE".to_string()
}

/// One logical repository: line *n* of every git-source field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitRepository {
    pub url: String,
    pub port: String,
    pub path: String,
    pub branch: String,
}

impl GitSourceDefinition {
    pub fn new(
        name: impl Into<String>,
        git_url: impl Into<String>,
        git_port: impl Into<String>,
        git_path: impl Into<String>,
        git_branch: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            git_url: git_url.into(),
            git_port: git_port.into(),
            git_path: git_path.into(),
            git_branch: git_branch.into(),
        }
    }

    /// Build a definition from the inbound parameter surface
    /// (`gitUrl`, `gitPort`, `gitPath`, `gitBranch`).
    pub fn from_parameters(name: impl Into<String>, params: &ParameterSet) -> Self {
        Self::new(
            name,
            params.get_or_empty("gitUrl"),
            params.get_or_empty("gitPort"),
            params.get_or_empty("gitPath"),
            params.get_or_empty("gitBranch"),
        )
    }

    pub fn git_urls(&self) -> Vec<String> {
        split_lines(&self.git_url)
    }

    pub fn git_ports(&self) -> Vec<String> {
        split_lines(&self.git_port)
    }

    pub fn git_paths(&self) -> Vec<String> {
        split_lines(&self.git_path)
    }

    pub fn git_branches(&self) -> Vec<String> {
        split_lines(&self.git_branch)
    }

    /// Zip the four fields into aligned repositories.
    ///
    /// Fields of uneven length are padded with empty strings up to the
    /// longest one.
    pub fn repositories(&self) -> Vec<GitRepository> {
        let urls = self.git_urls();
        let ports = self.git_ports();
        let paths = self.git_paths();
        let branches = self.git_branches();

        let len = urls
            .len()
            .max(ports.len())
            .max(paths.len())
            .max(branches.len());

        let at = |list: &[String], i: usize| list.get(i).cloned().unwrap_or_default();

        (0..len)
            .map(|i| GitRepository {
                url: at(&urls, i),
                port: at(&ports, i),
                path: at(&paths, i),
                branch: at(&branches, i),
            })
            .collect()
    }

    /// The value a build receives when repository `index` is chosen.
    pub fn select(&self, index: usize) -> Option<GitSourceValue> {
        self.repositories()
            .into_iter()
            .nth(index)
            .map(|repository| GitSourceValue::new(self.name.clone(), repository))
    }
}

/// Selected git-source parameter value for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSourceValue {
    pub name: String,
    pub repository: GitRepository,
}

impl GitSourceValue {
    pub fn new(name: impl Into<String>, repository: GitRepository) -> Self {
        Self {
            name: name.into(),
            repository,
        }
    }

    /// Export this value into a build environment.
    ///
    /// Sets `Git_Url`, `Git_Port`, `Git_Path`, `Git_Branch`, and binds the
    /// parameter name itself to the selected URL.
    pub fn build_environment(&self, env: &mut EnvVars) {
        let repo = &self.repository;
        env.insert("Git_Url".to_string(), repo.url.clone());
        env.insert("Git_Port".to_string(), repo.port.clone());
        env.insert("Git_Path".to_string(), repo.path.clone());
        env.insert("Git_Branch".to_string(), repo.branch.clone());
        env.insert(self.name.clone(), repo.url.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_fields_zip_positionally() {
        let def = GitSourceDefinition::new("SRC", "u1\nu2", "p1\np2", "a\nb", "m\nt");
        let repos = def.repositories();

        assert_eq!(repos.len(), 2);
        assert_eq!((repos[0].url.as_str(), repos[0].port.as_str()), ("u1", "p1"));
        assert_eq!((repos[1].url.as_str(), repos[1].port.as_str()), ("u2", "p2"));
        assert_eq!(repos[1].branch, "t");
    }

    #[test]
    fn uneven_fields_pad_with_empty_strings() {
        let def = GitSourceDefinition::new("SRC", "u1\nu2\nu3", "p1", "", "master");
        let repos = def.repositories();

        assert_eq!(repos.len(), 3);
        assert_eq!(repos[2].url, "u3");
        assert_eq!(repos[2].port, "");
        assert_eq!(repos[0].path, "");
        assert_eq!(repos[1].branch, "");
    }

    #[test]
    fn empty_definition_has_one_empty_repository() {
        let def = GitSourceDefinition::default();
        assert_eq!(def.repositories(), vec![GitRepository::default()]);
    }

    #[test]
    fn select_out_of_range_is_none() {
        let def = GitSourceDefinition::new("SRC", "u1", "p1", "a", "m");
        assert!(def.select(0).is_some());
        assert!(def.select(1).is_none());
    }

    #[test]
    fn build_environment_exports_git_variables() {
        let def = GitSourceDefinition::new("SRC", "u1\nu2", "p1\np2", "a\nb", "m\nt");
        let value = def.select(1).unwrap();

        let mut env = EnvVars::new();
        value.build_environment(&mut env);

        assert_eq!(env.get("Git_Url").map(String::as_str), Some("u2"));
        assert_eq!(env.get("Git_Port").map(String::as_str), Some("p2"));
        assert_eq!(env.get("Git_Path").map(String::as_str), Some("b"));
        assert_eq!(env.get("Git_Branch").map(String::as_str), Some("t"));
        assert_eq!(env.get("SRC").map(String::as_str), Some("u2"));
    }

    #[test]
    fn from_parameters_reads_inbound_names() {
        let params = ParameterSet::new()
            .with("gitUrl", "u1\nu2")
            .with("gitPort", "p1\np2");
        let def = GitSourceDefinition::from_parameters("SRC", &params);

        assert_eq!(def.git_urls(), vec!["u1", "u2"]);
        assert_eq!(def.git_ports(), vec!["p1", "p2"]);
        assert_eq!(def.git_paths(), vec![""]);
    }
}
