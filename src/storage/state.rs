//! Persisted sync state.
//!
//! Remembers the remote's concurrency token between runs, plus a hash of
//! the content last reconciled with the remote so `tmd status` can tell
//! whether the local copy has drifted. Both are only meaningful for the
//! remote they were recorded against, so that remote is stored too.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::file::atomic_write;
use crate::error::Result;

/// What the last successful remote exchange left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncState {
    /// `owner/repo@branch:path` of the remote this state came from.
    pub remote: Option<String>,
    /// Blob SHA of the remote file; empty when no remote file exists.
    pub sha: String,
    /// SHA-256 of the content at the last fetch or push.
    pub last_synced_hash: Option<String>,
    /// RFC 3339 timestamp of the last fetch or push.
    pub last_synced_at: Option<String>,
}

impl SyncState {
    /// The token to send with the next push, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        (!self.sha.is_empty()).then_some(self.sha.as_str())
    }

    /// Whether this state was recorded against `remote`.
    #[must_use]
    pub fn belongs_to(&self, remote: &str) -> bool {
        self.remote.as_deref() == Some(remote)
    }
}

/// JSON file holding the [`SyncState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// State file that sits next to a document: `todo.md` → `todo.md.sync.json`.
    #[must_use]
    pub fn beside(document: &Path) -> Self {
        let mut name = document.file_name().unwrap_or_default().to_os_string();
        name.push(".sync.json");
        Self::new(document.with_file_name(name))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. Missing or unreadable state starts fresh.
    #[must_use]
    pub fn load(&self) -> SyncState {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return SyncState::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Ignoring unreadable sync state");
            SyncState::default()
        })
    }

    /// # Errors
    ///
    /// Returns an error if the state cannot be serialized or written.
    pub fn save(&self, state: &SyncState) -> Result<()> {
        let content = serde_json::to_string_pretty(state)?;
        atomic_write(&self.path, &content)
    }
}
