//! Run configuration.
//!
//! Every fixed path the pipeline touches is derived from a single data root
//! and collected into [`SetupConfig`], which is built once at the start of a
//! run and threaded through each step. The storage mode comes from the
//! `STORAGE_TYPE` environment variable when set, otherwise from the
//! `docker.STORAGE_TYPE` field of the bot's `config.json`.

use crate::error::{Result, SetupError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Remote repository holding the PyLav cog suite.
pub const COG_REPO_URL: &str = "https://github.com/PyLav/Red-Cogs";

/// Repository name as registered with RepoManager.
pub const COG_REPO_NAME: &str = "pylav";

/// Branch the repository is pinned to.
pub const COG_REPO_BRANCH: &str = "master";

/// Substring the deployment tag must contain for the run to proceed.
pub const DEPLOYMENT_TAG_MARKER: &str = "pylav";

/// Storage backend of the host bot.
///
/// JSON-backed bots manage cogs through RepoManager/Downloader settings
/// files and a CogManager folder; any other backend gets the checkout
/// dropped directly into the bot's cog path with no registry writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Json,
    Folder,
}

impl StorageMode {
    /// Parse a `STORAGE_TYPE` value. Only `JSON` (any casing) selects
    /// [`StorageMode::Json`]; everything else is direct-folder mode.
    pub fn from_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            StorageMode::Json
        } else {
            StorageMode::Folder
        }
    }

    pub fn is_json(self) -> bool {
        matches!(self, StorageMode::Json)
    }
}

/// The bot's `config.json`, reduced to the field we read.
#[derive(Debug, Deserialize)]
struct BotConfig {
    docker: DockerSection,
}

#[derive(Debug, Deserialize)]
struct DockerSection {
    #[serde(rename = "STORAGE_TYPE")]
    storage_type: String,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct SetupConfig {
    pub storage_mode: StorageMode,

    /// Remote to clone or pull from.
    pub repo_url: String,

    /// RepoManager settings document.
    pub repo_manager_settings: PathBuf,

    /// Downloader settings document.
    pub downloader_settings: PathBuf,

    /// Shared library folder pip installs into.
    pub downloader_lib: PathBuf,

    /// Working copy of the cog repository. Location depends on storage mode.
    pub checkout: PathBuf,

    /// CogManager folder the cogs are copied into (JSON mode only).
    pub cog_folder: PathBuf,

    /// Single-line commit-hash state file.
    pub hash_file: PathBuf,

    /// pip executable inside the bot's virtualenv.
    pub pip: PathBuf,
}

impl SetupConfig {
    /// Resolve the configuration for a data root.
    ///
    /// `storage_override` takes precedence over the bot config file; when
    /// neither is available this errors rather than guessing a backend.
    pub fn resolve(
        data_root: &Path,
        repo_url: &str,
        storage_override: Option<&str>,
    ) -> Result<Self> {
        let storage_mode = match storage_override {
            Some(value) => StorageMode::from_value(value),
            None => Self::storage_mode_from_bot_config(&data_root.join("config.json"))?,
        };

        let cogs_root = data_root.join("cogs");
        let checkout = if storage_mode.is_json() {
            cogs_root.join("RepoManager").join("repos").join(COG_REPO_NAME)
        } else {
            data_root.join(COG_REPO_NAME).join("cogs")
        };

        Ok(Self {
            storage_mode,
            repo_url: repo_url.to_string(),
            repo_manager_settings: cogs_root.join("RepoManager").join("settings.json"),
            downloader_settings: cogs_root.join("Downloader").join("settings.json"),
            downloader_lib: cogs_root.join("Downloader").join("lib"),
            checkout,
            cog_folder: cogs_root.join("CogManager").join("cogs"),
            hash_file: data_root.join(COG_REPO_NAME).join(".hashfile"),
            pip: data_root.join("venv").join("bin").join("pip"),
        })
    }

    fn storage_mode_from_bot_config(path: &Path) -> Result<StorageMode> {
        if !path.exists() {
            return Err(SetupError::BotConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let config: BotConfig =
            serde_json::from_str(&content).map_err(|e| SetupError::BotConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(StorageMode::from_value(&config.docker.storage_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn storage_mode_json_is_case_insensitive() {
        assert!(StorageMode::from_value("JSON").is_json());
        assert!(StorageMode::from_value("json").is_json());
        assert!(StorageMode::from_value("Json").is_json());
    }

    #[test]
    fn storage_mode_other_values_select_folder() {
        assert_eq!(StorageMode::from_value("postgres"), StorageMode::Folder);
        assert_eq!(StorageMode::from_value(""), StorageMode::Folder);
    }

    #[test]
    fn override_takes_precedence_over_missing_config_file() {
        let temp = TempDir::new().unwrap();
        let config = SetupConfig::resolve(temp.path(), COG_REPO_URL, Some("JSON")).unwrap();
        assert!(config.storage_mode.is_json());
    }

    #[test]
    fn storage_mode_read_from_bot_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.json"),
            r#"{"docker": {"STORAGE_TYPE": "postgres"}}"#,
        )
        .unwrap();

        let config = SetupConfig::resolve(temp.path(), COG_REPO_URL, None).unwrap();
        assert_eq!(config.storage_mode, StorageMode::Folder);
    }

    #[test]
    fn missing_bot_config_errors() {
        let temp = TempDir::new().unwrap();
        let err = SetupConfig::resolve(temp.path(), COG_REPO_URL, None).unwrap_err();
        assert!(matches!(err, SetupError::BotConfigNotFound { .. }));
    }

    #[test]
    fn malformed_bot_config_errors() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), "{not json").unwrap();

        let err = SetupConfig::resolve(temp.path(), COG_REPO_URL, None).unwrap_err();
        assert!(matches!(err, SetupError::BotConfigParse { .. }));
    }

    #[test]
    fn checkout_location_depends_on_storage_mode() {
        let temp = TempDir::new().unwrap();

        let json = SetupConfig::resolve(temp.path(), COG_REPO_URL, Some("JSON")).unwrap();
        assert_eq!(
            json.checkout,
            temp.path()
                .join("cogs")
                .join("RepoManager")
                .join("repos")
                .join("pylav")
        );

        let folder = SetupConfig::resolve(temp.path(), COG_REPO_URL, Some("postgres")).unwrap();
        assert_eq!(folder.checkout, temp.path().join("pylav").join("cogs"));
    }

    #[test]
    fn fixed_paths_derive_from_data_root() {
        let temp = TempDir::new().unwrap();
        let config = SetupConfig::resolve(temp.path(), COG_REPO_URL, Some("JSON")).unwrap();

        let cogs = temp.path().join("cogs");
        assert_eq!(
            config.repo_manager_settings,
            cogs.join("RepoManager").join("settings.json")
        );
        assert_eq!(
            config.downloader_settings,
            cogs.join("Downloader").join("settings.json")
        );
        assert_eq!(config.downloader_lib, cogs.join("Downloader").join("lib"));
        assert_eq!(config.cog_folder, cogs.join("CogManager").join("cogs"));
        assert_eq!(config.hash_file, temp.path().join("pylav").join(".hashfile"));
        assert_eq!(
            config.pip,
            temp.path().join("venv").join("bin").join("pip")
        );
    }
}
