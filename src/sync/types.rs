//! Sync result types.

use serde::Serialize;

/// How a sync cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Remote document adopted as-is.
    RemoteWins,
    /// Remote document adopted and pushed back because some of its todo
    /// lines had no id.
    Normalized,
    /// Local-only todos appended to the remote document and pushed.
    Merged,
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RemoteWins => write!(f, "remote_wins"),
            Self::Normalized => write!(f, "normalized"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// Summary of one sync cycle.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub outcome: SyncOutcome,
    /// Todos in the document after the cycle.
    pub todos: usize,
    /// Local-only todos appended to the remote.
    pub appended: usize,
    /// Whether the cycle wrote to the remote.
    pub pushed: bool,
    /// Concurrency token after the cycle.
    pub sha: String,
}
