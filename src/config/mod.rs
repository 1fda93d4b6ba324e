//! Configuration management.
//!
//! This module resolves the todomd home directory and loads the repository
//! coordinates and the GitHub token stored there.
//!
//! # Layout
//!
//! ```text
//! ~/.todomd/
//!   config.json            repository coordinates (owner, repo, branch, filePath)
//!   credentials            GitHub token, mode 0600
//!   todo.md                local copy of the document
//!   todo.md.sync.json      concurrency token and last-synced hash
//! ```
//!
//! The home directory can be moved with `--home` / `TMD_HOME`, and the
//! document with `--file` / `TMD_FILE`.

mod credentials;

pub use credentials::{load_token, save_token, TOKEN_ENV};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default branch for new configurations.
pub const DEFAULT_BRANCH: &str = "main";
/// Default path of the document inside the repository.
pub const DEFAULT_FILE_PATH: &str = "todo.md";
/// Default GitHub API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Repository coordinates and client settings.
///
/// Missing keys take their defaults, so older or hand-written files keep
/// loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Path of the document inside the repository
    pub file_path: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            branch: DEFAULT_BRANCH.to_string(),
            file_path: DEFAULT_FILE_PATH.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// True when owner, repo and token are all set.
#[must_use]
pub fn is_configured(config: &AppConfig, token: &str) -> bool {
    !config.owner.is_empty() && !config.repo.is_empty() && !token.is_empty()
}

/// Get the default todomd home directory (`~/.todomd`).
#[must_use]
pub fn default_home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".todomd"))
}

/// Resolve the home directory.
///
/// Priority:
/// 1. Explicit `--home` flag (clap also fills this from `TMD_HOME`)
/// 2. `~/.todomd`
///
/// # Errors
///
/// Returns an error if no home directory can be determined.
pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    default_home_dir().ok_or_else(|| Error::Config("Could not determine home directory".into()))
}

/// Resolve the local document path.
///
/// An explicit `--file` wins; otherwise `<home>/todo.md`.
#[must_use]
pub fn resolve_document_path(home: &Path, explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| home.join(DEFAULT_FILE_PATH), Path::to_path_buf)
}

fn config_path(home: &Path) -> PathBuf {
    home.join("config.json")
}

/// Load the configuration.
///
/// A missing file gives the defaults. So does an unreadable one, with a
/// warning, so a bad edit never locks the user out of their local list.
#[must_use]
pub fn load_config(home: &Path) -> AppConfig {
    let path = config_path(home);
    let Ok(raw) = fs::read_to_string(&path) else {
        return AppConfig::default();
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
        AppConfig::default()
    })
}

/// Save the configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_config(home: &Path, config: &AppConfig) -> Result<()> {
    fs::create_dir_all(home)
        .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

    fs::write(config_path(home), content)
        .map_err(|e| Error::Config(format!("Failed to write config file: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.branch, "main");
        assert_eq!(config.file_path, "todo.md");
        assert!(config.owner.is_empty());
        assert!(config.repo.is_empty());
    }

    #[test]
    fn test_is_configured() {
        let mut config = AppConfig::default();
        assert!(!is_configured(&config, "tok"));
        config.owner = "me".into();
        assert!(!is_configured(&config, "tok"));
        config.repo = "notes".into();
        assert!(is_configured(&config, "tok"));
        assert!(!is_configured(&config, ""));
    }

    #[test]
    fn test_load_missing_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(load_config(temp_dir.path()), AppConfig::default());
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.json"),
            r#"{"owner":"me","repo":"notes"}"#,
        )
        .unwrap();

        let config = load_config(temp_dir.path());
        assert_eq!(config.owner, "me");
        assert_eq!(config.repo, "notes");
        assert_eq!(config.branch, "main");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.json"), "nope").unwrap();
        assert_eq!(load_config(temp_dir.path()), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("home");
        let config = AppConfig {
            owner: "me".into(),
            repo: "notes".into(),
            branch: "todo".into(),
            file_path: "lists/todo.md".into(),
            ..AppConfig::default()
        };
        save_config(&home, &config).unwrap();
        assert_eq!(load_config(&home), config);
    }

    #[test]
    fn test_resolve_paths() {
        let home = PathBuf::from("/tmp/tmd-home");
        assert_eq!(resolve_home(Some(&home)).unwrap(), home);
        assert_eq!(resolve_document_path(&home, None), home.join("todo.md"));

        let explicit = PathBuf::from("/notes/list.md");
        assert_eq!(resolve_document_path(&home, Some(&explicit)), explicit);
    }
}
