//! In-memory [`ContentStore`] for engine tests.
//!
//! Enforces the same token rules as the contents API: a push must carry
//! the current SHA when the file exists, and no SHA when it does not.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{ConnectionCheck, ContentStore, RemoteFile, RepoCoords};
use crate::error::{Error, Result};

#[derive(Default)]
pub(crate) struct MemoryStore {
    file: Mutex<Option<RemoteFile>>,
    revision: AtomicUsize,
    pushes: Mutex<Vec<String>>,
    pub fail_fetch: AtomicBool,
    pub fail_push: AtomicBool,
}

impl MemoryStore {
    pub fn with_file(content: &str, sha: &str) -> Self {
        let store = Self::default();
        *store.file.lock().unwrap() = Some(RemoteFile {
            content: content.to_string(),
            sha: sha.to_string(),
        });
        store
    }

    /// Simulate someone else committing to the remote.
    pub fn replace_remotely(&self, content: &str, sha: &str) {
        *self.file.lock().unwrap() = Some(RemoteFile {
            content: content.to_string(),
            sha: sha.to_string(),
        });
    }

    pub fn current(&self) -> Option<RemoteFile> {
        self.file.lock().unwrap().clone()
    }

    /// Contents of every accepted push, oldest first.
    pub fn pushes(&self) -> Vec<String> {
        self.pushes.lock().unwrap().clone()
    }
}

impl ContentStore for MemoryStore {
    async fn fetch(&self, _coords: &RepoCoords) -> Result<RemoteFile> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Error::Remote {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(self.current().unwrap_or_default())
    }

    async fn push(
        &self,
        _coords: &RepoCoords,
        content: &str,
        expected_sha: Option<&str>,
        _message: &str,
    ) -> Result<String> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(Error::Remote {
                status: 502,
                message: "Bad Gateway".into(),
            });
        }

        let mut file = self.file.lock().unwrap();
        match (file.as_ref(), expected_sha) {
            (Some(current), Some(sha)) if current.sha == sha => {}
            (None, None) => {}
            (Some(_), None) => return Err(Error::Conflict { status: 422 }),
            _ => return Err(Error::Conflict { status: 409 }),
        }

        let sha = format!("sha-{}", self.revision.fetch_add(1, Ordering::SeqCst) + 1);
        *file = Some(RemoteFile {
            content: content.to_string(),
            sha: sha.clone(),
        });
        self.pushes.lock().unwrap().push(content.to_string());
        Ok(sha)
    }

    async fn test_connection(&self, _coords: &RepoCoords) -> ConnectionCheck {
        if self.fail_fetch.load(Ordering::SeqCst) {
            ConnectionCheck::failed("unreachable")
        } else {
            ConnectionCheck::ok()
        }
    }
}
