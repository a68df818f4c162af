// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `versionup`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "versionup",
    version,
    about = "Query commit logs and bump package versions through an external build script.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Versionup.toml` in the current working directory. A missing
    /// default file means built-in defaults.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `VERSIONUP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the repositories declared by the `[parameter]` section.
    Repos,

    /// Print the build environment exported by the selected repository.
    Env {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Run the commit-log script and print the commit data it produced.
    CommitLog {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Run the version-up build step.
    VersionUp {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Package version rule passed as `PACKAGE_VERSION_RULE`.
        #[arg(long, value_name = "RULE", default_value = "")]
        rule: String,

        /// Passed as `SINGLE_ID`.
        #[arg(long, value_name = "ID", default_value = "")]
        single_id: String,

        /// Change-log text passed as `CHANGE_DATA`.
        #[arg(long, value_name = "TEXT")]
        change_log: Option<String>,

        /// Extra variable to redact (repeatable).
        #[arg(long = "sensitive", value_name = "NAME")]
        sensitive: Vec<String>,
    },
}

/// Which repository to use: an index into `[parameter]`, or explicit values.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Zero-based repository index in the `[parameter]` section.
    #[arg(long, value_name = "N", conflicts_with = "url")]
    pub index: Option<usize>,

    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    #[arg(long, value_name = "PORT")]
    pub port: Option<String>,

    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Job workspace directory.
    #[arg(long, value_name = "DIR")]
    pub workspace: PathBuf,

    /// Print the (redacted) command line without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Stop waiting and kill the tool after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
