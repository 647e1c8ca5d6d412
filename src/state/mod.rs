//! Commit-state persistence.
//!
//! A single flat file records the commit that was synced by the previous
//! run. Its absence means "no prior state", which reads as the empty string
//! so that any real commit counts as a change.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// The commit-hash state file.
#[derive(Debug, Clone)]
pub struct CommitFile {
    path: PathBuf,
}

impl CommitFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The previously recorded commit, or the empty string when absent.
    pub fn read(&self) -> Result<String> {
        if self.path.exists() {
            Ok(fs::read_to_string(&self.path)?)
        } else {
            Ok(String::new())
        }
    }

    /// Record `commit` as the file's entire contents.
    pub fn write(&self, commit: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, commit)?;
        Ok(())
    }
}
