//! pylav-setup - Container-boot synchronizer for the PyLav cog suite.
//!
//! Runs once per container startup: syncs the PyLav cog repository into the
//! bot's data directory, copies the cogs into place, installs their declared
//! pip requirements, and rewrites the bot's RepoManager/Downloader registries
//! so the framework sees the cogs as installed and pinned. The whole pass is
//! skipped when the checked-out commit matches the one recorded by the
//! previous run.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`cogs`] - Cog discovery, manifests, and deployment
//! - [`config`] - Path layout and storage-mode resolution
//! - [`error`] - Error types and result alias
//! - [`registry`] - RepoManager and Downloader settings documents
//! - [`repo`] - Repository synchronization via the git CLI
//! - [`requirements`] - Requirement collection and the pip installer
//! - [`runner`] - Top-level pipeline and outcome reporting
//! - [`state`] - Commit-state persistence

pub mod cli;
pub mod cogs;
pub mod config;
pub mod error;
pub mod registry;
pub mod repo;
pub mod requirements;
pub mod runner;
pub mod state;

pub use error::{Result, SetupError};
