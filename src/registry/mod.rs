//! Registry settings documents for the host framework.
//!
//! Two JSON documents make the bot recognize the synced cogs as installed:
//!
//! - [`repo_manager`] - the RepoManager settings, mapping repository name to
//!   branch; this tool only ever inserts the fixed pylav/master pair
//! - [`downloader`] - the Downloader settings, holding the installed-cog
//!   records that pin each cog to the synced commit
//!
//! Both are read whole, mutated in memory, and written back whole. Fields
//! this tool does not know about are carried through untouched. Writes are
//! not transactional; the tool assumes it is the only writer.

pub mod downloader;
pub mod repo_manager;

use crate::error::{Result, SetupError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| SetupError::RegistryParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub(crate) fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string(document).map_err(|e| SetupError::RegistryParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, content)?;
    Ok(())
}
