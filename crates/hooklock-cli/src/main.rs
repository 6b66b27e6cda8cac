//! sync-pre-commit
//!
//! Aligns the `rev:` and `additional_dependencies` pins of a pre-commit
//! configuration with the versions resolved in the project lockfile.

mod cli;
mod error;
mod logging;
mod report;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use hooklock_core::{
    InstallHooks, InstallOutcome, LockedPackages, SyncConfig, SyncHooks, SyncOutcome,
};
use hooklock_fs::ProjectFile;
use serde::Serialize;

use cli::Cli;
use error::{CliError, Result};

/// Machine-readable result for `--json`.
#[derive(Debug, Serialize)]
struct JsonReport {
    sync: SyncOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    install: Option<InstallOutcome>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_level())
        .map_err(|e| CliError::user(format!("Failed to set up logging: {e}")))?;
    if cli.json || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let root = match &cli.project {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let pyproject = cli
        .config
        .clone()
        .unwrap_or_else(|| ProjectFile::PyProject.in_dir(&root));
    let config = SyncConfig::load(&pyproject)?;
    tracing::debug!(?config, "Loaded configuration");

    let hook_config = config.pre_commit_config_path(&root);
    let locked = load_lock(&cli, &root, &config, &hook_config)?;
    let sync = SyncHooks::new(hook_config, &locked, &config)
        .dry_run(cli.dry_run)
        .execute()?;

    let install = (config.automatically_install_hooks && !cli.no_install)
        .then(|| InstallHooks::new(&root).dry_run(cli.dry_run).execute());

    if cli.json {
        let report = JsonReport { sync, install };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        for line in report::sync_lines(&sync) {
            println!("{line}");
        }
        if let Some(line) = install.as_ref().and_then(report::install_line) {
            println!("{line}");
        }
    }

    Ok(())
}

/// The lock is not needed when syncing is disabled or there is no hook
/// configuration to sync.
fn load_lock(
    cli: &Cli,
    root: &Path,
    config: &SyncConfig,
    hook_config: &Path,
) -> Result<LockedPackages> {
    if config.disable_sync_from_lock || !hook_config.exists() {
        return Ok(LockedPackages::new());
    }
    let (path, locked): (PathBuf, LockedPackages) = match &cli.lockfile {
        Some(path) => (path.clone(), LockedPackages::from_lockfile(path)?),
        None => LockedPackages::discover(root)?,
    };
    tracing::debug!(path = %path.display(), packages = locked.len(), "Using lockfile");
    Ok(locked)
}
