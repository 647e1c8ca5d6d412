//! Top-level control flow.
//!
//! One linear pipeline per invocation:
//!
//! gate -> sync -> compare -> up-to-date (terminal)
//!                         -> install -> deploy -> persist -> wait
//!
//! Everything from the install step onward runs under a suppression
//! boundary: errors there are logged and folded into
//! [`RunOutcome::Failed`] so the container boot never fails on a bad
//! update. The pip child, if one was spawned, is killed unconditionally
//! before the run returns. Errors before the boundary (config resolution,
//! git, manifest parsing) propagate to the caller.

use crate::cli::Cli;
use crate::cogs;
use crate::config::{
    SetupConfig, COG_REPO_BRANCH, COG_REPO_NAME, DEPLOYMENT_TAG_MARKER,
};
use crate::error::Result;
use crate::registry::{downloader, repo_manager};
use crate::repo;
use crate::requirements::{self, installer::PipInstall};
use crate::state::CommitFile;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// How a run ended. Every variant maps to exit code 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Gate closed: not a PyLav deployment image.
    Skipped,

    /// The synced commit matches the recorded one; nothing to do.
    UpToDate,

    /// Cogs, registries, and commit state were updated.
    Updated,

    /// The update phase failed; the cause was logged and suppressed.
    Failed { cause: String },
}

/// Whether the deployment tag opens the gate.
pub fn gate_open(tag: Option<&str>) -> bool {
    tag.is_some_and(|t| t.contains(DEPLOYMENT_TAG_MARKER))
}

/// Run the full pipeline for the given CLI arguments.
pub fn run(cli: &Cli) -> Result<RunOutcome> {
    if !gate_open(cli.tag.as_deref()) {
        info!("Skipping PyLav setup and update");
        return Ok(RunOutcome::Skipped);
    }

    let config = SetupConfig::resolve(
        &cli.data_root,
        &cli.repo_url,
        cli.storage_type.as_deref(),
    )?;
    run_with_config(&config)
}

/// Run the pipeline past the gate, against resolved paths.
pub fn run_with_config(config: &SetupConfig) -> Result<RunOutcome> {
    prepare_folders(config)?;

    let current_commit = repo::sync(&config.repo_url, &config.checkout)?;
    let hash_file = CommitFile::new(&config.hash_file);
    let existing_commit = hash_file.read()?;
    let cogs = cogs::discover(&config.checkout)?;

    if current_commit == existing_commit {
        info!("PyLav is up to date");
        return Ok(RunOutcome::UpToDate);
    }

    let requirements = requirements::collect(&cogs)?;

    let mut pip: Option<PipInstall> = None;
    let result = update(config, &cogs, &requirements, &current_commit, &hash_file, &mut pip);
    if let Some(pip) = pip.as_mut() {
        pip.kill();
    }

    match result {
        Ok(()) => Ok(RunOutcome::Updated),
        Err(e) => {
            info!("PyLav setup and update failed: {e}");
            Ok(RunOutcome::Failed {
                cause: e.to_string(),
            })
        }
    }
}

/// The guarded install/deploy/persist phase.
fn update(
    config: &SetupConfig,
    cogs: &cogs::CogMap,
    requirements: &BTreeSet<String>,
    current_commit: &str,
    hash_file: &CommitFile,
    pip: &mut Option<PipInstall>,
) -> Result<()> {
    if config.storage_mode.is_json() {
        cogs::deploy(cogs, &config.cog_folder)?;
    }

    *pip = requirements::installer::install(config, requirements)?;

    info!("Current PyLav-Cogs Commit: {current_commit}");
    let records = downloader::generate_records(cogs, COG_REPO_NAME, current_commit);
    info!("Updated Downloader Data: {records:?}");

    if config.storage_mode.is_json() {
        downloader::write_installed(&config.downloader_settings, COG_REPO_NAME, records)?;
        repo_manager::ensure_repo(
            &config.repo_manager_settings,
            COG_REPO_NAME,
            COG_REPO_BRANCH,
        )?;
    }

    hash_file.write(current_commit)?;

    if let Some(pip) = pip.as_mut() {
        pip.wait()?;
    }

    info!("PyLav setup and update finished");
    Ok(())
}

fn prepare_folders(config: &SetupConfig) -> Result<()> {
    for folder in [&config.downloader_lib, &config.checkout, &config.cog_folder] {
        if !folder.exists() {
            fs::create_dir_all(folder)?;
            set_shared_mode(folder)?;
        }
    }
    Ok(())
}

// The container's bot user and the setup user may differ; the working
// folders are group/other writable like the rest of the data directory.
#[cfg(unix)]
fn set_shared_mode(folder: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(folder, fs::Permissions::from_mode(0o776))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_shared_mode(_folder: &Path) -> Result<()> {
    Ok(())
}
