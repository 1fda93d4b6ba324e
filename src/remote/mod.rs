//! Remote content store.
//!
//! The remote copy of the document lives in a git repository and is read and
//! written through a contents API keyed by owner/repo/branch/path. Every
//! fetch returns a content hash (the blob SHA) that must accompany the next
//! write, so a concurrent remote change is rejected instead of overwritten.
//!
//! [`ContentStore`] is the seam the sync engine talks to; [`GitHubClient`]
//! is the production implementation.

mod github;
#[cfg(test)]
pub(crate) mod memory;

pub use github::{GitHubClient, API_VERSION, USER_AGENT};

use crate::config::AppConfig;
use crate::error::Result;
use serde::Serialize;

/// Where the document lives remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoords {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
}

impl RepoCoords {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            path: config.file_path.clone(),
        }
    }

    /// `owner/repo@branch:path`, the form shown to users and stored with
    /// the sync state.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}@{}:{}", self.owner, self.repo, self.branch, self.path)
    }

    /// Commit message used for pushes.
    #[must_use]
    pub fn commit_message(&self) -> String {
        format!("Update {}", self.path)
    }
}

/// Result of a fetch: content plus the token guarding the next write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteFile {
    pub content: String,
    /// Empty when the file does not exist yet.
    pub sha: String,
}

impl RemoteFile {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        (!self.sha.is_empty()).then_some(self.sha.as_str())
    }
}

/// Outcome of a reachability/credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionCheck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionCheck {
    #[must_use]
    pub fn ok() -> Self {
        Self { ok: true, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// A remote file store with optimistic-concurrency writes.
pub trait ContentStore: Send + Sync {
    /// Fetch the file. A missing file is an empty [`RemoteFile`], not an error.
    fn fetch(&self, coords: &RepoCoords) -> impl std::future::Future<Output = Result<RemoteFile>> + Send;

    /// Write the file and return the new token.
    ///
    /// `expected_sha` must be the token from the last fetch when the file
    /// exists; a stale token fails with [`crate::Error::Conflict`].
    fn push(
        &self,
        coords: &RepoCoords,
        content: &str,
        expected_sha: Option<&str>,
        message: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Check that the repository is reachable with the configured credential.
    fn test_connection(&self, coords: &RepoCoords) -> impl std::future::Future<Output = ConnectionCheck> + Send;
}
