//! RepoManager settings document.
//!
//! Shape on disk: `{"170708480": {"GLOBAL": {"repos": {<name>: <branch>}}}}`.
//! The numeric key is RepoManager's fixed config identifier.

use super::{read_document, write_document};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RepoManagerSettings {
    #[serde(rename = "170708480")]
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
    repos: BTreeMap<String, String>,

    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

impl RepoManagerSettings {
    pub fn load(path: &Path) -> Result<Self> {
        read_document(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_document(path, self)
    }

    pub fn contains_repo(&self, name: &str) -> bool {
        self.identifier.global.repos.contains_key(name)
    }

    pub fn insert_repo(&mut self, name: &str, branch: &str) {
        self.identifier
            .global
            .repos
            .insert(name.to_string(), branch.to_string());
    }
}

/// Make sure the settings document registers `name` at `branch`.
///
/// Creates the document when absent. When present, the file is rewritten
/// only if the pair was missing, so repeated runs leave it untouched.
pub fn ensure_repo(path: &Path, name: &str, branch: &str) -> Result<()> {
    if !path.exists() {
        info!("Creating RepoManager setting");
        let mut settings = RepoManagerSettings::default();
        settings.insert_repo(name, branch);
        return settings.save(path);
    }

    info!("Updating RepoManager setting");
    let mut settings = RepoManagerSettings::load(path)?;
    if !settings.contains_repo(name) {
        settings.insert_repo(name, branch);
        settings.save(path)?;
    }
    Ok(())
}
