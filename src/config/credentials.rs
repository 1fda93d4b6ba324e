//! GitHub token storage.
//!
//! The token lives in `<home>/credentials`, readable only by the owner on
//! unix. `TMD_GITHUB_TOKEN` overrides the file.

use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Environment variable that overrides the stored token.
pub const TOKEN_ENV: &str = "TMD_GITHUB_TOKEN";

fn credentials_path(home: &Path) -> PathBuf {
    home.join("credentials")
}

/// Load the token, or an empty string if none is set.
#[must_use]
pub fn load_token(home: &Path) -> String {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            return token.trim().to_string();
        }
    }

    fs::read_to_string(credentials_path(home))
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// Store the token. An empty token deletes the credentials file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or removed.
pub fn save_token(home: &Path, token: &str) -> Result<()> {
    let path = credentials_path(home);
    let token = token.trim();

    if token.is_empty() {
        return match fs::remove_file(&path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        };
    }

    fs::create_dir_all(home)?;
    let mut opts = fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(0o600);
    let mut file = opts.open(&path)?;
    file.write_all(token.as_bytes())?;
    file.sync_all()?;

    Ok(())
}
