use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use versionup::config::{load_and_validate, load_or_default};
use versionup::errors::VersionUpError;
use versionup::types::{Platform, PlatformSetting};

#[test]
fn full_config_round_trips_into_typed_sections() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
sensitive = ["GIT_SERVER_URL"]

[tool]
program = "ant"
script_dir = "/opt/versionup"
platform = "windows"

[commit_log]
script = "ant-version.xml"

[version_up]
script = "ant-version-temp.xml"
subcommand = "versionup"

[report]
include_logs = true

[env]
JAVA_HOME = "/usr/lib/jvm/default"

[parameter]
name = "GIT_SOURCE"
git_url = "git://h/a\ngit://h/b"
git_port = "29418\n29418"
git_path = "proj-a\nproj-b"
git_branch = "master\ntizen"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.tool.platform, PlatformSetting::Windows);
    assert_eq!(cfg.tool.platform.resolve(), Platform::Windows);
    assert!(cfg.sensitive.contains("GIT_SERVER_URL"));
    assert!(cfg.report.include_logs);
    assert_eq!(cfg.env.get("JAVA_HOME").map(String::as_str), Some("/usr/lib/jvm/default"));

    let commit = cfg.commit_log_script();
    assert_eq!(commit.path, PathBuf::from("/opt/versionup").join("ant-version.xml"));
    assert_eq!(commit.subcommand.as_deref(), Some("commit"));
    assert_eq!(commit.result_file.as_deref(), Some("commit-data"));

    let version = cfg.version_up_script();
    assert_eq!(version.subcommand.as_deref(), Some("versionup"));
    assert_eq!(version.result_file, None);

    let repos = cfg.parameter.as_ref().unwrap().repositories();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[1].branch, "tizen");
}

#[test]
fn empty_program_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[tool]\nprogram = \"\"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(VersionUpError::ConfigError(msg)) => assert!(msg.contains("[tool].program")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_platform_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[tool]\nplatform = \"dos\"\n").unwrap();

    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(VersionUpError::TomlError(_))));
}

#[test]
fn missing_explicit_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_and_validate(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(VersionUpError::IoError(_))));
}

#[test]
fn missing_default_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_or_default(dir.path().join("Versionup.toml")).unwrap();

    assert_eq!(cfg.tool.program, "ant");
    assert!(cfg.parameter.is_none());
    assert!(cfg.sensitive.is_empty());
}
