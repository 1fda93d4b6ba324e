//! Sync command implementation.

use super::{runtime, Workspace};
use crate::error::{Error, Result};
use crate::sync::{SyncOutcome, SyncReport};

/// Execute the sync command.
///
/// # Errors
///
/// Returns [`Error::NotConfigured`] without owner, repo and token, and
/// propagates fetch, push and I/O failures.
pub fn execute(workspace: &Workspace, json: bool) -> Result<()> {
    let mut session = workspace.open(true)?;
    if !session.has_remote() {
        return Err(Error::NotConfigured);
    }

    let report = runtime()?.block_on(session.sync())?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", summary(&report));
    }
    Ok(())
}

fn summary(report: &SyncReport) -> String {
    match report.outcome {
        SyncOutcome::RemoteWins => format!("Up to date with remote ({} todos)", report.todos),
        SyncOutcome::Normalized => format!(
            "Pulled remote and wrote back todo ids ({} todos)",
            report.todos
        ),
        SyncOutcome::Merged => format!(
            "Pushed {} local todo{} ({} todos)",
            report.appended,
            if report.appended == 1 { "" } else { "s" },
            report.todos
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_wording() {
        let mut report = SyncReport {
            outcome: SyncOutcome::Merged,
            todos: 3,
            appended: 1,
            pushed: true,
            sha: "abc".into(),
        };
        assert_eq!(summary(&report), "Pushed 1 local todo (3 todos)");

        report.appended = 2;
        assert_eq!(summary(&report), "Pushed 2 local todos (3 todos)");

        report.outcome = SyncOutcome::RemoteWins;
        assert_eq!(summary(&report), "Up to date with remote (3 todos)");
    }
}
