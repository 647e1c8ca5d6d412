//! Error types for pylav-setup operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SetupError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors
//! - Errors raised during the guarded update phase are logged and suppressed
//!   by the runner; the process still exits 0 so the container boot proceeds

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pylav-setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Bot configuration file not found at expected location.
    #[error("Bot config not found: {path}")]
    BotConfigNotFound { path: PathBuf },

    /// Failed to parse the bot configuration file.
    #[error("Failed to parse bot config at {path}: {message}")]
    BotConfigParse { path: PathBuf, message: String },

    /// A git invocation that must succeed reported a failure.
    #[error("git {command} failed with exit code {code:?}")]
    GitFailed { command: String, code: Option<i32> },

    /// Failed to parse a cog manifest (`info.json`).
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Failed to parse a registry settings document.
    #[error("Failed to parse registry at {path}: {message}")]
    RegistryParse { path: PathBuf, message: String },

    /// Could not spawn a child process.
    #[error("Failed to spawn {command}: {message}")]
    SpawnFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pylav-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_config_not_found_displays_path() {
        let err = SetupError::BotConfigNotFound {
            path: PathBuf::from("/data/config.json"),
        };
        assert!(err.to_string().contains("/data/config.json"));
    }

    #[test]
    fn git_failed_displays_command_and_code() {
        let err = SetupError::GitFailed {
            command: "rev-parse HEAD".into(),
            code: Some(128),
        };
        let msg = err.to_string();
        assert!(msg.contains("rev-parse HEAD"));
        assert!(msg.contains("128"));
    }

    #[test]
    fn manifest_parse_displays_path_and_message() {
        let err = SetupError::ManifestParse {
            path: PathBuf::from("/repo/audio/info.json"),
            message: "expected value at line 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("audio/info.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn registry_parse_displays_path() {
        let err = SetupError::RegistryParse {
            path: PathBuf::from("/data/cogs/Downloader/settings.json"),
            message: "invalid type".into(),
        };
        assert!(err.to_string().contains("Downloader/settings.json"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
    }
}
