//! Keeping the local document and the remote copy in step.
//!
//! - **Hashing**: SHA-256 of the document at the last remote exchange
//! - **Merge**: pure reconciliation of local and remote line sequences
//! - **Session**: mutations, push-after-edit, and the sync cycle
//!
//! # Policy
//!
//! The remote copy is authoritative. A sync adopts it wholesale unless the
//! local document holds todos whose ids the remote has never seen; those
//! are appended after the remote's lines and the result is pushed with the
//! token from the fetch. A stale token is a conflict and nothing is
//! overwritten.
//!
//! Local edits to todos the remote also has are lost at the next sync if
//! the push that followed the edit did not land.

pub mod hash;
pub mod merge;
pub mod session;
pub mod types;

pub use hash::{content_hash, has_changed};
pub use merge::{local_only, reconcile, Reconciliation};
pub use session::{PendingPush, TodoSession};
pub use types::{SyncOutcome, SyncReport};
