//! Command implementations.

pub mod completions;
pub mod config;
pub mod status;
pub mod sync;
pub mod todo;
pub mod upcoming;
pub mod version;

use crate::config::{is_configured, load_config, load_token, resolve_document_path, resolve_home};
use crate::error::{Error, Result};
use crate::remote::{GitHubClient, RepoCoords};
use crate::storage::{LocalStore, StateStore};
use crate::sync::TodoSession;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Resolved locations for one invocation.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub home: PathBuf,
    pub document: PathBuf,
}

impl Workspace {
    /// Resolve `--home` and `--file`.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn resolve(home: Option<&Path>, file: Option<&Path>) -> Result<Self> {
        let home = resolve_home(home)?;
        let document = resolve_document_path(&home, file);
        Ok(Self { home, document })
    }

    /// Open the document. With `online`, attach the GitHub remote when
    /// owner, repo and token are all configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or the HTTP client
    /// cannot be built.
    pub fn open(&self, online: bool) -> Result<TodoSession<GitHubClient>> {
        let session = TodoSession::open(
            LocalStore::new(&self.document),
            StateStore::beside(&self.document),
        )?;
        if !online {
            return Ok(session);
        }

        let config = load_config(&self.home);
        let token = load_token(&self.home);
        if !is_configured(&config, &token) {
            debug!("Remote not configured, working locally");
            return Ok(session);
        }

        let client = GitHubClient::from_config(&config, &token)?;
        Ok(session.with_remote(Arc::new(client), RepoCoords::from_config(&config)))
    }
}

/// Build the runtime network commands block on.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))
}
