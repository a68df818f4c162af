// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod param;
pub mod props;
pub mod report;
pub mod step;
pub mod types;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::{CliArgs, Command, RunArgs, SourceArgs};
use crate::config::{ConfigFile, default_config_path, load_and_validate, load_or_default};
use crate::errors::VersionUpError;
use crate::exec::{CancelSignal, RealProcessRunner};
use crate::param::{GitRepository, GitSourceValue};
use crate::report::Report;
use crate::step::{CommitLogRequest, VersionUpRequest, commit_log, host_env, version_up};
use crate::types::EnvVars;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - repository selection from the git-source parameter
/// - the commit-log / version-up steps on the real process runner
/// - Ctrl-C and `--timeout` cancellation
///
/// Exit codes: 0 for a success report, 1 for a failure report.
pub async fn run(args: CliArgs) -> Result<ExitCode> {
    let cfg = match &args.config {
        Some(path) => load_and_validate(path)?,
        None => load_or_default(default_config_path())?,
    };

    match args.command {
        Command::Repos => {
            print_repositories(&cfg)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Env { source } => {
            let value = resolve_source(&cfg, &source)?;
            let mut env = EnvVars::new();
            value.build_environment(&mut env);
            for (key, val) in &env {
                println!("{key}={val}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::CommitLog { source, run } => {
            let value = resolve_source(&cfg, &source)?;
            let request = CommitLogRequest::new(value.repository, &run.workspace);
            let host = host_env();

            if run.dry_run {
                println!("{}", commit_log::prepare(&cfg, &request, &host).command_line());
                return Ok(ExitCode::SUCCESS);
            }

            let runner = RealProcessRunner::new();
            let cancel = spawn_cancel_watch(&run);
            let report = commit_log::run(&cfg, &request, &host, &runner, cancel).await;
            Ok(finish(report))
        }
        Command::VersionUp {
            source,
            run,
            rule,
            single_id,
            change_log,
            sensitive,
        } => {
            let value = resolve_source(&cfg, &source)?;
            let mut request = VersionUpRequest::new(value, &run.workspace);
            request.package_version_rule = rule;
            request.single_id = single_id;
            request.change_log = change_log;
            request.sensitive.extend(sensitive);
            let host = host_env();

            if run.dry_run {
                println!("{}", version_up::prepare(&cfg, &request, &host).command_line());
                return Ok(ExitCode::SUCCESS);
            }

            let runner = RealProcessRunner::new();
            let cancel = spawn_cancel_watch(&run);
            let report = version_up::run(&cfg, &request, &host, &runner, cancel).await;
            Ok(finish(report))
        }
    }
}

/// Pick the git-source value for this run.
///
/// `--index` selects from `[parameter]`; explicit `--url/--port/--path/--branch`
/// build a value directly; with neither, the first declared repository is used.
pub fn resolve_source(cfg: &ConfigFile, source: &SourceArgs) -> errors::Result<GitSourceValue> {
    let name = cfg
        .parameter
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "GIT_SOURCE".to_string());

    let explicit = source.url.is_some()
        || source.port.is_some()
        || source.path.is_some()
        || source.branch.is_some();

    if explicit {
        let repository = GitRepository {
            url: source.url.clone().unwrap_or_default(),
            port: source.port.clone().unwrap_or_default(),
            path: source.path.clone().unwrap_or_default(),
            branch: source.branch.clone().unwrap_or_default(),
        };
        return Ok(GitSourceValue::new(name, repository));
    }

    let parameter = cfg.parameter.as_ref().ok_or_else(|| {
        VersionUpError::ConfigError(
            "no [parameter] section; pass --url/--port/--path/--branch".to_string(),
        )
    })?;

    let index = source.index.unwrap_or(0);
    parameter.select(index).ok_or_else(|| {
        VersionUpError::ConfigError(format!(
            "[parameter] has no repository at index {index} ({} declared)",
            parameter.repositories().len()
        ))
    })
}

fn print_repositories(cfg: &ConfigFile) -> errors::Result<()> {
    let parameter = cfg
        .parameter
        .as_ref()
        .ok_or_else(|| VersionUpError::ConfigError("no [parameter] section".to_string()))?;

    println!("{} ({} repositories):", parameter.name, parameter.repositories().len());
    for (i, repo) in parameter.repositories().iter().enumerate() {
        println!(
            "  [{i}] url={} port={} path={} branch={}",
            repo.url, repo.port, repo.path, repo.branch
        );
    }
    Ok(())
}

/// Cancel the running tool on Ctrl-C or when `--timeout` elapses.
fn spawn_cancel_watch(run: &RunArgs) -> CancelSignal {
    let (tx, signal) = CancelSignal::pair();
    let timeout = run.timeout;

    tokio::spawn(async move {
        let deadline = async {
            match timeout {
                Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    warn!(error = %e, "failed to listen for Ctrl+C");
                    return;
                }
                info!("Ctrl+C received; cancelling");
            }
            _ = deadline => {
                warn!(timeout_secs = timeout, "timeout elapsed; cancelling");
            }
        }
        let _ = tx.send(());
    });

    signal
}

fn finish(report: Report) -> ExitCode {
    print!("{report}");
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
