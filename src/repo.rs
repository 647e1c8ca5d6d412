//! Repository synchronization via the git CLI.
//!
//! The working copy is owned entirely by this tool: local modifications are
//! discarded and untracked files removed before every pull. Individual
//! reset/clean/pull/clone invocations are fire-and-forget (their exit status
//! is ignored, matching the tool's best-effort policy); only the final
//! `rev-parse HEAD` must succeed, since its output drives change detection.

use crate::error::{Result, SetupError};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Configure a child process for non-interactive use.
///
/// Terminal prompts are disabled, any credential helper popup is stripped,
/// and the locale is forced to C so output stays machine-stable.
pub fn apply_noninteractive_env(cmd: &mut Command) {
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("LC_ALL", "C");
    cmd.env("LANGUAGE", "C");
    cmd.env_remove("GIT_ASKPASS");
}

fn git(checkout: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(args);
    cmd.current_dir(checkout);
    apply_noninteractive_env(&mut cmd);
    cmd
}

/// Clone or fast-forward the cog repository and return its HEAD commit.
pub fn sync(repo_url: &str, checkout: &Path) -> Result<String> {
    if checkout.join(".git").exists() {
        info!("Updating PyLav repo");
        let _status = git(checkout, &["reset", "--hard", "HEAD", "-q"]).status()?;
        let _status = git(checkout, &["clean", "-f", "-d", "-q"]).status()?;
        let _status = git(checkout, &["pull", "-q", "--rebase", "--autostash"]).status()?;
    } else {
        info!("Cloning PyLav repo");
        let mut cmd = Command::new("git");
        cmd.arg("clone").arg(repo_url).arg(checkout);
        apply_noninteractive_env(&mut cmd);
        let _status = cmd.status()?;
    }

    head_commit(checkout)
}

/// Resolve the working copy's HEAD commit identifier.
pub fn head_commit(checkout: &Path) -> Result<String> {
    let output = git(checkout, &["rev-parse", "HEAD"]).output()?;

    if !output.status.success() {
        return Err(SetupError::GitFailed {
            command: "rev-parse HEAD".to_string(),
            code: output.status.code(),
        });
    }

    let commit = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!("HEAD is {commit}");
    Ok(commit)
}
