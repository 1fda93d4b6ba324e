//! The todo session: local document, sync state, and remote in one place.
//!
//! Every mutation builds a new [`ParsedFile`] from the current one, writes
//! it to disk, and only then replaces the in-memory copy. A failed write
//! leaves the session exactly as it was.
//!
//! Pushing after an edit is fire-and-forget: [`TodoSession::spawn_push`]
//! starts the upload on the runtime and [`TodoSession::settle_push`] records
//! the new token if it landed. A rejected push is logged and otherwise
//! ignored; the next [`TodoSession::sync`] reconciles.

use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::hash::{content_hash, has_changed};
use super::merge::{reconcile, Reconciliation};
use super::types::{SyncOutcome, SyncReport};
use crate::error::{Error, Result};
use crate::markdown::{has_unstored_ids, parse, ParsedFile};
use crate::model::{TodoItem, TodoPatch};
use crate::remote::{ContentStore, RepoCoords};
use crate::storage::{LocalStore, StateStore, SyncState};
use crate::validate::validate_todo;

struct Remote<S> {
    store: Arc<S>,
    coords: RepoCoords,
}

/// An upload started by [`TodoSession::spawn_push`].
pub struct PendingPush {
    handle: JoinHandle<Result<String>>,
    content_hash: String,
}

/// Owns the document and its sync bookkeeping for one command.
pub struct TodoSession<S> {
    document: LocalStore,
    state_store: StateStore,
    state: SyncState,
    file: ParsedFile,
    remote: Option<Remote<S>>,
}

impl<S: ContentStore + 'static> TodoSession<S> {
    /// Load the local document and sync state.
    ///
    /// A document that is not in canonical form (todo lines without ids,
    /// alternate checkbox marks) is rewritten right away so the ids handed
    /// out here are the ones stored on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or rewritten.
    pub fn open(document: LocalStore, state_store: StateStore) -> Result<Self> {
        let content = document.read()?;
        let file = parse(&content);
        let canonical = file.to_content();
        if canonical != content {
            debug!(path = %document.path().display(), "Rewriting document in canonical form");
            document.write(&canonical)?;
        }

        let state = state_store.load();
        Ok(Self {
            document,
            state_store,
            state,
            file,
            remote: None,
        })
    }

    /// Attach a remote store.
    ///
    /// Sync state recorded against different coordinates is dropped, so no
    /// token from another repository, branch, or path is ever sent.
    #[must_use]
    pub fn with_remote(mut self, store: Arc<S>, coords: RepoCoords) -> Self {
        let key = coords.key();
        if self.state != SyncState::default() && !self.state.belongs_to(&key) {
            info!(
                previous = self.state.remote.as_deref().unwrap_or("unknown"),
                remote = %key,
                "Remote changed; starting from a fresh sync state"
            );
            self.state = SyncState::default();
        }
        self.remote = Some(Remote { store, coords });
        self
    }

    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    #[must_use]
    pub fn file(&self) -> &ParsedFile {
        &self.file
    }

    #[must_use]
    pub fn state(&self) -> &SyncState {
        &self.state
    }

    #[must_use]
    pub fn document_path(&self) -> &Path {
        self.document.path()
    }

    /// Whether the document differs from what was last exchanged with the
    /// remote.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        has_changed(
            &content_hash(&self.file.to_content()),
            self.state.last_synced_hash.as_deref(),
        )
    }

    /// Resolve a full id or unique id prefix to the stored id.
    ///
    /// # Errors
    ///
    /// [`Error::TodoNotFound`] when nothing matches, [`Error::AmbiguousId`]
    /// when a prefix matches several todos.
    pub fn resolve_id(&self, query: &str) -> Result<String> {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return Err(Error::InvalidArgument("Todo id cannot be empty".into()));
        }

        if let Some(todo) = self.file.todos().find(|t| t.id.eq_ignore_ascii_case(&query)) {
            return Ok(todo.id.clone());
        }

        let matches: Vec<&TodoItem> = self
            .file
            .todos()
            .filter(|t| t.id.to_ascii_lowercase().starts_with(&query))
            .collect();
        match matches.as_slice() {
            [] => Err(Error::TodoNotFound { id: query }),
            [todo] => Ok(todo.id.clone()),
            many => Err(Error::AmbiguousId {
                id: query,
                matches: many.iter().map(|t| t.short_id().to_string()).collect(),
            }),
        }
    }

    /// Append a todo to the end of the document.
    ///
    /// # Errors
    ///
    /// Fails on invalid fields or if the document cannot be written.
    pub fn add(&mut self, todo: TodoItem) -> Result<TodoItem> {
        validate_todo(&todo)?;
        let file = self.file.with_appended(todo.clone());
        self.commit(file)?;
        info!(id = %todo.id, "Added todo");
        Ok(todo)
    }

    /// Flip the done flag of a todo.
    ///
    /// # Errors
    ///
    /// Fails if the id does not resolve or the write fails.
    pub fn toggle(&mut self, query: &str) -> Result<TodoItem> {
        let id = self.resolve_id(query)?;
        let file = self
            .file
            .with_updated(&id, |t| TodoItem {
                done: !t.done,
                ..t.clone()
            })
            .ok_or_else(|| Error::TodoNotFound { id: id.clone() })?;
        let todo = file
            .find(&id)
            .cloned()
            .ok_or_else(|| Error::TodoNotFound { id: id.clone() })?;
        self.commit(file)?;
        info!(id = %id, done = todo.done, "Toggled todo");
        Ok(todo)
    }

    /// Change name, due date, or recurrence of a todo.
    ///
    /// # Errors
    ///
    /// Fails on an empty patch, invalid fields, an unknown id, or a failed
    /// write.
    pub fn edit(&mut self, query: &str, patch: &TodoPatch) -> Result<TodoItem> {
        if patch.is_empty() {
            return Err(Error::InvalidArgument("Nothing to change".into()));
        }
        let id = self.resolve_id(query)?;
        let current = self
            .file
            .find(&id)
            .ok_or_else(|| Error::TodoNotFound { id: id.clone() })?;
        let updated = patch.apply(current);
        validate_todo(&updated)?;

        let file = self
            .file
            .with_updated(&id, |_| updated.clone())
            .ok_or_else(|| Error::TodoNotFound { id: id.clone() })?;
        self.commit(file)?;
        info!(id = %id, "Edited todo");
        Ok(updated)
    }

    /// Remove a todo line.
    ///
    /// # Errors
    ///
    /// Fails if the id does not resolve or the write fails.
    pub fn delete(&mut self, query: &str) -> Result<TodoItem> {
        let id = self.resolve_id(query)?;
        let removed = self
            .file
            .find(&id)
            .cloned()
            .ok_or_else(|| Error::TodoNotFound { id: id.clone() })?;
        let file = self
            .file
            .without(&id)
            .ok_or_else(|| Error::TodoNotFound { id: id.clone() })?;
        self.commit(file)?;
        info!(id = %id, "Deleted todo");
        Ok(removed)
    }

    fn commit(&mut self, file: ParsedFile) -> Result<()> {
        self.document.write(&file.to_content())?;
        self.file = file;
        Ok(())
    }

    /// Start uploading the current document with the stored token.
    ///
    /// Returns `None` when no remote is attached. Must be called from
    /// inside a tokio runtime.
    #[must_use]
    pub fn spawn_push(&self) -> Option<PendingPush> {
        let remote = self.remote.as_ref()?;
        let store = Arc::clone(&remote.store);
        let coords = remote.coords.clone();
        let content = self.file.to_content();
        let expected = self.state.token().map(str::to_string);
        let hash = content_hash(&content);

        let handle = tokio::spawn(async move {
            let message = coords.commit_message();
            store
                .push(&coords, &content, expected.as_deref(), &message)
                .await
        });
        Some(PendingPush {
            handle,
            content_hash: hash,
        })
    }

    /// Wait for a spawned push and record its token.
    ///
    /// Failures are logged and dropped.
    pub async fn settle_push(&mut self, pending: PendingPush) {
        match pending.handle.await {
            Ok(Ok(sha)) => {
                debug!(sha = %sha, "Pushed local edit");
                self.record_exchange(sha, pending.content_hash);
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Push after edit failed; run `tmd sync` to reconcile");
            }
            Err(e) => {
                warn!(error = %e, "Push task did not finish");
            }
        }
    }

    /// [`Self::spawn_push`] followed by [`Self::settle_push`].
    pub async fn push_after_edit(&mut self) {
        if let Some(pending) = self.spawn_push() {
            self.settle_push(pending).await;
        }
    }

    /// Run one sync cycle.
    ///
    /// 1. Fetch the remote document and its token.
    /// 2. If no local-only todo is missing remotely, adopt the remote.
    ///    A remote holding todo lines without ids is pushed back with the
    ///    ids assigned here; any other remote is left untouched.
    /// 3. Otherwise append the local-only todos, write the result locally,
    ///    and push it with the fetched token.
    ///
    /// On any error the local document, the sync state, and this session
    /// are left as they were before the call.
    ///
    /// # Errors
    ///
    /// [`Error::NotConfigured`] without a remote; otherwise fetch, push, or
    /// I/O errors. A push rejected because the remote moved on is
    /// [`Error::Conflict`].
    pub async fn sync(&mut self) -> Result<SyncReport> {
        let remote = self.remote.as_ref().ok_or(Error::NotConfigured)?;
        let store = Arc::clone(&remote.store);
        let coords = remote.coords.clone();

        info!(owner = %coords.owner, repo = %coords.repo, path = %coords.path, "Syncing");
        let fetched = store.fetch(&coords).await?;
        let remote_file = parse(&fetched.content);

        let (outcome, file, appended) = match reconcile(&self.file, &remote_file) {
            Reconciliation::RemoteWins if has_unstored_ids(&fetched.content) => {
                (SyncOutcome::Normalized, remote_file, 0)
            }
            Reconciliation::RemoteWins => (SyncOutcome::RemoteWins, remote_file, 0),
            Reconciliation::Merged { file, appended } => {
                (SyncOutcome::Merged, file, appended.len())
            }
        };
        let content = file.to_content();

        let previous = self.file.to_content();
        self.document.write(&content)?;

        let pushed = outcome != SyncOutcome::RemoteWins;
        let sha = if pushed {
            match store
                .push(&coords, &content, fetched.token(), &coords.commit_message())
                .await
            {
                Ok(sha) => sha,
                Err(e) => {
                    if let Err(restore) = self.document.write(&previous) {
                        warn!(error = %restore, "Could not restore local document");
                    }
                    return Err(e);
                }
            }
        } else {
            fetched.sha
        };

        let todos = file.todos().count();
        self.file = file;
        self.record_exchange(sha.clone(), content_hash(&content));
        info!(outcome = %outcome, todos, appended, "Sync complete");

        Ok(SyncReport {
            outcome,
            todos,
            appended,
            pushed,
            sha,
        })
    }

    fn record_exchange(&mut self, sha: String, hash: String) {
        self.state.remote = self.remote.as_ref().map(|r| r.coords.key());
        self.state.sha = sha;
        self.state.last_synced_hash = Some(hash);
        self.state.last_synced_at = Some(chrono::Utc::now().to_rfc3339());
        if let Err(e) = self.state_store.save(&self.state) {
            warn!(error = %e, path = %self.state_store.path().display(), "Failed to save sync state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::memory::MemoryStore;
    use std::fs;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    const A: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa";
    const B: &str = "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb";
    const C: &str = "cccccccc-cccc-4ccc-8ccc-cccccccccccc";

    fn line(name: &str, id: &str, done: bool) -> String {
        format!("- [{}] {name} (id: {id})", if done { 'x' } else { '_' })
    }

    fn coords() -> RepoCoords {
        RepoCoords {
            owner: "me".into(),
            repo: "notes".into(),
            branch: "main".into(),
            path: "todo.md".into(),
        }
    }

    fn open(dir: &TempDir, local: &str, store: &Arc<MemoryStore>) -> TodoSession<MemoryStore> {
        let path = dir.path().join("todo.md");
        fs::write(&path, local).unwrap();
        TodoSession::open(LocalStore::new(&path), StateStore::beside(&path))
            .unwrap()
            .with_remote(Arc::clone(store), coords())
    }

    fn reopen(dir: &TempDir) -> TodoSession<MemoryStore> {
        let path = dir.path().join("todo.md");
        TodoSession::open(LocalStore::new(&path), StateStore::beside(&path)).unwrap()
    }

    fn on_disk(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join("todo.md")).unwrap()
    }

    #[tokio::test]
    async fn test_sync_remote_superset_adopts_remote() {
        let dir = TempDir::new().unwrap();
        let remote = format!("{}\n{}\n", line("A", A, true), line("B", B, false));
        let store = Arc::new(MemoryStore::with_file(&remote, "s1"));
        let mut session = open(&dir, &format!("{}\n", line("A", A, false)), &store);

        let report = session.sync().await.unwrap();
        assert_eq!(report.outcome, SyncOutcome::RemoteWins);
        assert!(!report.pushed);
        assert_eq!(report.todos, 2);
        assert_eq!(on_disk(&dir), remote);
        assert_eq!(session.file().to_content(), remote);
        assert_eq!(session.state().sha, "s1");
        assert!(store.pushes().is_empty());
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_sync_appends_local_only_and_pushes() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::with_file(
            &format!("# List\n{}\n", line("A", A, true)),
            "s1",
        ));
        let local = format!("{}\n{}\n", line("A", A, false), line("C", C, false));
        let mut session = open(&dir, &local, &store);

        let report = session.sync().await.unwrap();
        let expected = format!("# List\n{}\n{}\n", line("A", A, true), line("C", C, false));
        assert_eq!(report.outcome, SyncOutcome::Merged);
        assert_eq!(report.appended, 1);
        assert!(report.pushed);
        assert_eq!(store.pushes(), vec![expected.clone()]);
        assert_eq!(on_disk(&dir), expected);
        assert_eq!(session.state().sha, "sha-1");
        assert_eq!(store.current().unwrap().sha, "sha-1");
    }

    #[tokio::test]
    async fn test_sync_creates_missing_remote_file() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::default());
        let local = format!("{}\n", line("C", C, false));
        let mut session = open(&dir, &local, &store);

        let report = session.sync().await.unwrap();
        assert_eq!(report.outcome, SyncOutcome::Merged);
        assert_eq!(store.current().unwrap().content, local);
        assert_eq!(on_disk(&dir), local);
    }

    #[tokio::test]
    async fn test_sync_normalizes_remote_without_ids_once() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::with_file("- [ ] Call Sam\n", "s1"));
        let mut session = open(&dir, "", &store);

        let report = session.sync().await.unwrap();
        assert_eq!(report.outcome, SyncOutcome::Normalized);
        assert!(report.pushed);
        let pushed = store.current().unwrap().content;
        let todo = session.file().todos().next().unwrap().clone();
        assert_eq!(todo.name, "Call Sam");
        assert!(pushed.contains(&format!("(id: {})", todo.id)));
        assert_eq!(on_disk(&dir), pushed);

        // The id is now stored remotely, so the next cycle is a no-op.
        let mut session = reopen(&dir).with_remote(Arc::clone(&store), coords());
        let report = session.sync().await.unwrap();
        assert_eq!(report.outcome, SyncOutcome::RemoteWins);
        assert_eq!(store.pushes().len(), 1);
        assert_eq!(session.file().todos().next().unwrap().id, todo.id);
    }

    #[tokio::test]
    async fn test_sync_leaves_cosmetic_remote_differences_alone() {
        let dir = TempDir::new().unwrap();
        let remote = format!(
            "- [_] Gym (reccurence: weekly) (id: {A})\n- [ ] Call (id: {B})\n"
        );
        let store = Arc::new(MemoryStore::with_file(&remote, "s1"));
        let mut session = open(&dir, &format!("{}\n", line("Gym", A, false)), &store);

        let report = session.sync().await.unwrap();
        assert_eq!(report.outcome, SyncOutcome::RemoteWins);
        assert!(!report.pushed);
        assert_eq!(report.sha, "s1");
        assert!(store.pushes().is_empty());
        assert_eq!(store.current().unwrap().content, remote);

        let expected = format!(
            "- [_] Gym (recurrence: weekly) (id: {A})\n{}\n",
            line("Call", B, false)
        );
        assert_eq!(on_disk(&dir), expected);
        assert_eq!(session.state().sha, "s1");
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_sync_fetch_failure_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::with_file(&line("A", A, false), "s1"));
        store.fail_fetch.store(true, Ordering::SeqCst);
        let local = format!("{}\n", line("C", C, false));
        let mut session = open(&dir, &local, &store);
        let before = session.state().clone();

        let err = session.sync().await.unwrap_err();
        assert!(matches!(err, Error::Remote { status: 500, .. }));
        assert_eq!(on_disk(&dir), local);
        assert_eq!(session.file().to_content(), local);
        assert_eq!(session.state(), &before);
    }

    #[tokio::test]
    async fn test_sync_push_failure_restores_local() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::with_file(&line("A", A, false), "s1"));
        store.fail_push.store(true, Ordering::SeqCst);
        let local = format!("{}\n", line("C", C, false));
        let mut session = open(&dir, &local, &store);

        assert!(session.sync().await.is_err());
        assert_eq!(on_disk(&dir), local);
        assert_eq!(session.file().to_content(), local);
        assert_eq!(session.state().sha, "");
        assert_eq!(store.current().unwrap().sha, "s1");
    }

    #[tokio::test]
    async fn test_sync_without_remote_is_not_configured() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.md");
        let mut session: TodoSession<MemoryStore> =
            TodoSession::open(LocalStore::new(&path), StateStore::beside(&path)).unwrap();
        assert!(matches!(session.sync().await, Err(Error::NotConfigured)));
    }

    #[tokio::test]
    async fn test_sync_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::with_file(&line("A", A, false), "s7"));
        let mut session = open(&dir, "", &store);
        session.sync().await.unwrap();

        let reopened = reopen(&dir);
        assert_eq!(reopened.state().sha, "s7");
        assert!(reopened.state().last_synced_at.is_some());
        assert!(!reopened.is_dirty());
    }

    #[tokio::test]
    async fn test_push_after_edit_updates_token() {
        let dir = TempDir::new().unwrap();
        let content = format!("{}\n", line("A", A, false));
        let store = Arc::new(MemoryStore::with_file(&content, "s1"));
        let mut session = open(&dir, &content, &store);
        session.sync().await.unwrap();

        session.toggle(A).unwrap();
        assert!(session.is_dirty());
        session.push_after_edit().await;

        assert_eq!(session.state().sha, "sha-1");
        assert_eq!(store.current().unwrap().content, on_disk(&dir));
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_push_after_edit_conflict_is_swallowed() {
        let dir = TempDir::new().unwrap();
        let content = format!("{}\n", line("A", A, false));
        let store = Arc::new(MemoryStore::with_file(&content, "s1"));
        let mut session = open(&dir, &content, &store);
        session.sync().await.unwrap();

        store.replace_remotely(&format!("{}\n", line("B", B, false)), "s2");
        session.toggle(A).unwrap();
        session.push_after_edit().await;

        assert_eq!(session.state().sha, "s1");
        assert!(session.file().find(A).unwrap().done);
        assert!(on_disk(&dir).contains(&line("A", A, true)));
        assert_eq!(store.current().unwrap().sha, "s2");
    }

    #[tokio::test]
    async fn test_state_from_another_remote_is_not_reused() {
        let dir = TempDir::new().unwrap();
        let content = format!("{}\n", line("A", A, false));
        let first = Arc::new(MemoryStore::with_file(&content, "s1"));
        let mut session = open(&dir, &content, &first);
        session.sync().await.unwrap();
        assert!(session.state().belongs_to(&coords().key()));

        // Another branch whose file happens to carry the same token.
        let work = RepoCoords {
            branch: "work".into(),
            ..coords()
        };
        let other_content = format!("{}\n", line("B", B, false));
        let second = Arc::new(MemoryStore::with_file(&other_content, "s1"));
        let mut session = reopen(&dir).with_remote(Arc::clone(&second), work.clone());
        assert_eq!(session.state().token(), None);
        assert!(session.is_dirty());

        session.toggle(A).unwrap();
        session.push_after_edit().await;
        assert!(second.pushes().is_empty());
        assert_eq!(second.current().unwrap().content, other_content);

        let report = session.sync().await.unwrap();
        assert_eq!(report.outcome, SyncOutcome::Merged);
        assert_eq!(
            second.current().unwrap().content,
            format!("{}\n{}\n", line("B", B, false), line("A", A, true))
        );
        assert!(reopen(&dir).state().belongs_to(&work.key()));
        assert!(first.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_push_after_edit_without_remote_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut session = reopen(&dir);
        session.add(TodoItem::new("Offline")).unwrap();
        assert!(session.spawn_push().is_none());
        session.push_after_edit().await;
        assert_eq!(session.state().sha, "");
    }

    #[test]
    fn test_open_canonicalizes_and_keeps_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.md");
        fs::write(&path, "# Todo\n- [ ] Call Sam\n").unwrap();

        let first = reopen(&dir);
        let id = first.file().todos().next().unwrap().id.clone();
        assert!(on_disk(&dir).contains(&format!("- [_] Call Sam (id: {id})")));

        let second = reopen(&dir);
        assert_eq!(second.file().todos().next().unwrap().id, id);
    }

    #[test]
    fn test_mutations_write_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.md");
        fs::write(&path, format!("# Todo\n{}\n", line("A", A, false))).unwrap();
        let mut session = reopen(&dir);

        let added = session.add(TodoItem::new("Buy milk")).unwrap();
        assert_eq!(
            on_disk(&dir),
            format!("# Todo\n{}\n- [_] Buy milk (id: {})\n", line("A", A, false), added.id)
        );

        let toggled = session.toggle(&added.id[..8]).unwrap();
        assert!(toggled.done);

        let patch = TodoPatch {
            due_date: Some(Some("2024-05-01".into())),
            ..TodoPatch::default()
        };
        let edited = session.edit(&added.id, &patch).unwrap();
        assert_eq!(edited.due_date.as_deref(), Some("2024-05-01"));
        assert!(on_disk(&dir).contains("- [x] Buy milk (due: 2024-05-01)"));

        session.delete(A).unwrap();
        assert_eq!(
            on_disk(&dir),
            format!("# Todo\n- [x] Buy milk (due: 2024-05-01) (id: {})\n", added.id)
        );
        assert_eq!(reopen(&dir).file(), session.file());
    }

    #[test]
    fn test_invalid_add_leaves_document_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.md");
        fs::write(&path, "# Todo\n").unwrap();
        let mut session = reopen(&dir);

        assert!(session.add(TodoItem::new("Meet (due: friday)")).is_err());
        assert!(session.edit("nope", &TodoPatch::default()).is_err());
        assert_eq!(on_disk(&dir), "# Todo\n");
    }

    #[test]
    fn test_resolve_id_prefix_rules() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.md");
        let a2 = "aaaaaaaa-bbbb-4aaa-8aaa-aaaaaaaaaaaa";
        fs::write(
            &path,
            [line("A", A, false), line("A2", a2, false), line("B", B, false)].join("\n"),
        )
        .unwrap();
        let session = reopen(&dir);

        assert_eq!(session.resolve_id(B).unwrap(), B);
        assert_eq!(session.resolve_id("BBBB").unwrap(), B);
        assert_eq!(session.resolve_id("aaaaaaaa-bbbb").unwrap(), a2);
        assert!(matches!(
            session.resolve_id("aaaa"),
            Err(Error::AmbiguousId { matches, .. }) if matches.len() == 2
        ));
        assert!(matches!(session.resolve_id("ffff"), Err(Error::TodoNotFound { .. })));
        assert!(matches!(session.resolve_id("  "), Err(Error::InvalidArgument(_))));
    }
}
