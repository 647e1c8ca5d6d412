//! Cog discovery, manifests, and deployment.
//!
//! A cog is a top-level directory of the repository checkout whose name
//! starts with `pl` or equals `audio`. Each cog may carry an `info.json`
//! manifest; the only field read from it is the optional `requirements`
//! list of pip specifiers.

use crate::error::{Result, SetupError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Manifest file name inside each cog directory.
pub const MANIFEST_FILE: &str = "info.json";

const COG_PREFIX: &str = "pl";
const AUDIO_COG: &str = "audio";

/// Discovered cogs, keyed by directory name.
pub type CogMap = BTreeMap<String, PathBuf>;

/// The portion of a cog's `info.json` this tool reads.
#[derive(Debug, Default, Deserialize)]
pub struct CogManifest {
    /// pip requirement specifiers declared by the cog.
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl CogManifest {
    /// Load the manifest from a cog directory.
    ///
    /// A missing file yields `None`; malformed JSON is an error.
    pub fn load(cog_dir: &Path) -> Result<Option<Self>> {
        let path = cog_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let manifest = serde_json::from_str(&content).map_err(|e| SetupError::ManifestParse {
            path,
            message: e.to_string(),
        })?;
        Ok(Some(manifest))
    }
}

/// Whether a directory name denotes a PyLav cog.
pub fn is_cog_name(name: &str) -> bool {
    name.starts_with(COG_PREFIX) || name == AUDIO_COG
}

/// Enumerate cog directories at the top level of the checkout.
pub fn discover(checkout: &Path) -> Result<CogMap> {
    let mut cogs = CogMap::new();

    for entry in fs::read_dir(checkout)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_cog_name(&name) {
            cogs.insert(name, entry.path());
        }
    }

    Ok(cogs)
}

/// Copy every discovered cog into the CogManager folder.
pub fn deploy(cogs: &CogMap, cog_folder: &Path) -> Result<()> {
    for (name, path) in cogs {
        copy_and_overwrite(path, &cog_folder.join(name))?;
    }
    Ok(())
}

/// Replace `to` with a recursive copy of `from`.
pub fn copy_and_overwrite(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        fs::remove_dir_all(to)?;
    }
    info!("Copying {} to {}", from.display(), to.display());
    copy_tree(from, to)?;
    Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}
