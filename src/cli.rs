//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The gate and storage variables are read from the environment, matching
//! how the Docker image invokes the binary; the path flags exist so the
//! pipeline can be pointed at a throwaway data root in tests.

use crate::config;
use clap::Parser;
use std::path::PathBuf;

/// pylav-setup - Sync the PyLav cog suite into a running bot's data directory.
#[derive(Debug, Parser)]
#[command(name = "pylav-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Bot data root; every fixed path is derived from it
    #[arg(long, default_value = "/data")]
    pub data_root: PathBuf,

    /// Cog repository to sync from
    #[arg(long, default_value = config::COG_REPO_URL)]
    pub repo_url: String,

    /// Deployment image tag; the run is skipped unless it contains "pylav"
    #[arg(long, env = "PCX_DISCORDBOT_TAG")]
    pub tag: Option<String>,

    /// Storage backend override (otherwise read from the bot's config.json)
    #[arg(long, env = "STORAGE_TYPE")]
    pub storage_type: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_container_data_root() {
        let cli = Cli::parse_from(["pylav-setup"]);
        assert_eq!(cli.data_root, PathBuf::from("/data"));
        assert_eq!(cli.repo_url, config::COG_REPO_URL);
        assert!(!cli.debug);
    }

    #[test]
    fn flags_override_paths() {
        let cli = Cli::parse_from([
            "pylav-setup",
            "--data-root",
            "/tmp/data",
            "--repo-url",
            "/tmp/repo",
            "--storage-type",
            "postgres",
        ]);
        assert_eq!(cli.data_root, PathBuf::from("/tmp/data"));
        assert_eq!(cli.repo_url, "/tmp/repo");
        assert_eq!(cli.storage_type.as_deref(), Some("postgres"));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
