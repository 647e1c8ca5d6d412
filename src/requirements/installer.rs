//! pip child process management.
//!
//! The installer is spawned against the bot's virtualenv pip with the
//! Downloader library folder as the install target, then its stdout is
//! tailed line-by-line (a plain synchronous read, no extra threads) until
//! the stream ends or pip prints its success line. The child is not awaited
//! here; the runner performs a blocking wait after the registries are
//! updated, and kills the handle unconditionally during cleanup.

use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::repo::apply_noninteractive_env;
use std::collections::BTreeSet;
use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};
use tracing::{debug, info};

/// pip's completion line; the output tail stops once a line starts with this.
pub const SUCCESS_SENTINEL: &str = "Successfully installed";

/// Handle to a running pip install.
#[derive(Debug)]
pub struct PipInstall {
    child: Child,
    // Held so pip's stdout pipe stays open after the tail stops; dropping it
    // early would SIGPIPE an installer that is still printing.
    _stdout: Option<BufReader<ChildStdout>>,
}

impl PipInstall {
    /// Block until pip exits.
    pub fn wait(&mut self) -> Result<()> {
        info!("Waiting for requirements to finish installing");
        self.child.wait()?;
        Ok(())
    }

    /// Terminate the child, ignoring failures (it may already have exited).
    pub fn kill(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawn pip for the given requirement set and tail its output.
///
/// Returns `None` without spawning anything when the set is empty.
pub fn install(
    config: &SetupConfig,
    requirements: &BTreeSet<String>,
) -> Result<Option<PipInstall>> {
    if requirements.is_empty() {
        info!("Requirements installed");
        return Ok(None);
    }

    info!("Installing requirements: {requirements:?}");

    let mut cmd = Command::new(&config.pip);
    cmd.arg("install")
        .args([
            "--upgrade",
            "--no-input",
            "--no-warn-conflicts",
            "--require-virtualenv",
            "--upgrade-strategy",
            "eager",
            "--target",
        ])
        .arg(&config.downloader_lib)
        .args(requirements);
    apply_noninteractive_env(&mut cmd);
    cmd.stdout(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| SetupError::SpawnFailed {
        command: config.pip.display().to_string(),
        message: e.to_string(),
    })?;

    let mut reader = child.stdout.take().map(BufReader::new);
    if let Some(reader) = reader.as_mut() {
        tail_output(reader);
    }

    Ok(Some(PipInstall {
        child,
        _stdout: reader,
    }))
}

/// Log pip's output line-by-line until EOF or the success sentinel.
fn tail_output(reader: &mut BufReader<ChildStdout>) {
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let line = line.trim_end_matches('\n');
                info!("{line}");
                if line.starts_with(SUCCESS_SENTINEL) {
                    break;
                }
            }
            Err(e) => {
                debug!("stopped tailing pip output: {e}");
                break;
            }
        }
    }
}
