//! Status command implementation.

use super::Workspace;
use crate::config::{is_configured, load_config, load_token};
use crate::error::Result;
use crate::remote::RepoCoords;
use serde::Serialize;

/// Output for status command.
#[derive(Serialize)]
struct StatusOutput {
    document: String,
    todo_count: usize,
    pending_count: usize,
    done_count: usize,
    configured: bool,
    remote: Option<String>,
    /// Local edits the remote has not seen
    unsynced: bool,
    last_synced_at: Option<String>,
}

/// Execute status command.
///
/// Never touches the network.
///
/// # Errors
///
/// Returns an error if the document cannot be read.
pub fn execute(workspace: &Workspace, json: bool) -> Result<()> {
    let session = workspace.open(false)?;
    let config = load_config(&workspace.home);
    let configured = is_configured(&config, &load_token(&workspace.home));

    let todo_count = session.file().todos().count();
    let done_count = session.file().todos().filter(|t| t.done).count();
    let remote = (!config.owner.is_empty() && !config.repo.is_empty())
        .then(|| RepoCoords::from_config(&config).key());
    // State recorded against other coordinates says nothing about this remote.
    let unsynced = session.is_dirty()
        || remote
            .as_deref()
            .is_some_and(|key| !session.state().belongs_to(key));

    let output = StatusOutput {
        document: session.document_path().display().to_string(),
        todo_count,
        pending_count: todo_count - done_count,
        done_count,
        configured,
        remote,
        unsynced,
        last_synced_at: session.state().last_synced_at.clone(),
    };

    if json {
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("Document: {}", output.document);
    println!(
        "Todos:    {} ({} pending, {} done)",
        output.todo_count, output.pending_count, output.done_count
    );
    match (&output.remote, output.configured) {
        (Some(remote), true) => println!("Remote:   {remote}"),
        (Some(remote), false) => println!("Remote:   {remote} (no token)"),
        (None, _) => println!("Remote:   not configured"),
    }
    match &output.last_synced_at {
        Some(at) => println!("Synced:   {at}"),
        None => println!("Synced:   never"),
    }
    if output.unsynced && output.configured {
        println!("Local changes not yet on the remote. Run `tmd sync`.");
    }
    Ok(())
}
