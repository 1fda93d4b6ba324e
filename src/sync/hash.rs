//! Content hashing for sync status.
//!
//! The SHA-256 of the document text at the last successful remote exchange
//! is stored in the sync state. Comparing it with the current local text
//! tells whether there are edits the remote has not seen.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hash of document content, as lowercase hex.
#[must_use]
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check if content has changed since the last sync.
///
/// Returns `true` if:
/// - There is no stored hash (never synced)
/// - The current hash differs from the stored hash
#[must_use]
pub fn has_changed(current_hash: &str, stored_hash: Option<&str>) -> bool {
    stored_hash.is_none_or(|h| h != current_hash)
}
