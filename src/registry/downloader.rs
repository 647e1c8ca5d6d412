//! Downloader settings document.
//!
//! Shape on disk:
//! `{"998240343": {"GLOBAL": {"installed_cogs": {<repo>: {<cog>: {...}}}}}}`.
//! The per-repo cog map is regenerated and replaced wholesale on every
//! update run, pinning each cog to the commit that was just synced.

use super::{read_document, write_document};
use crate::cogs::CogMap;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// One installed-cog record as Downloader expects it.
///
/// Records for repos this tool does not manage pass through here on every
/// rewrite, so fields beyond the four we set are carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledCog {
    pub repo_name: String,
    pub module_name: String,
    pub commit: String,
    pub pinned: bool,

    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

/// Installed-cog records for one repository, keyed by cog name.
pub type CogRecords = BTreeMap<String, InstalledCog>;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DownloaderSettings {
    #[serde(rename = "998240343")]
    identifier: Scope,

    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Scope {
    #[serde(rename = "GLOBAL")]
    global: Global,

    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Global {
    installed_cogs: BTreeMap<String, CogRecords>,

    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

impl DownloaderSettings {
    pub fn load(path: &Path) -> Result<Self> {
        read_document(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_document(path, self)
    }

    pub fn installed_cogs(&self, repo: &str) -> Option<&CogRecords> {
        self.identifier.global.installed_cogs.get(repo)
    }

    pub fn set_installed_cogs(&mut self, repo: &str, records: CogRecords) {
        self.identifier
            .global
            .installed_cogs
            .insert(repo.to_string(), records);
    }
}

/// Build the installed-cog records for the cogs synced at `commit`.
pub fn generate_records(cogs: &CogMap, repo_name: &str, commit: &str) -> CogRecords {
    cogs.keys()
        .map(|name| {
            (
                name.clone(),
                InstalledCog {
                    repo_name: repo_name.to_string(),
                    module_name: name.clone(),
                    commit: commit.to_string(),
                    pinned: true,
                    rest: BTreeMap::new(),
                },
            )
        })
        .collect()
}

/// Replace the repo's installed-cog records, creating the document if absent.
pub fn write_installed(path: &Path, repo_name: &str, records: CogRecords) -> Result<()> {
    let mut settings = if path.exists() {
        info!("Updating Downloader setting");
        DownloaderSettings::load(path)?
    } else {
        info!("Creating Downloader setting");
        DownloaderSettings::default()
    };

    settings.set_installed_cogs(repo_name, records);
    settings.save(path)
}
