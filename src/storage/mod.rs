//! Local persistence.
//!
//! - [`file`] - the markdown document itself, written atomically
//! - [`state`] - concurrency token and last-synced hash, as JSON

pub mod file;
pub mod state;

pub use file::{atomic_write, LocalStore};
pub use state::{StateStore, SyncState};
