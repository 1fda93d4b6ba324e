//! Version command implementation.

use crate::config::DEFAULT_API_BASE_URL;
use crate::error::Result;
use crate::remote::{API_VERSION, USER_AGENT};
use serde::Serialize;

/// What `tmd version` reports: the binary plus the GitHub API it speaks.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionOutput {
    version: &'static str,
    build: &'static str,
    github_api_version: &'static str,
    default_api_url: &'static str,
    user_agent: &'static str,
}

impl VersionOutput {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build: if cfg!(debug_assertions) { "dev" } else { "release" },
            github_api_version: API_VERSION,
            default_api_url: DEFAULT_API_BASE_URL,
            user_agent: USER_AGENT,
        }
    }
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let output = VersionOutput::current();

    if json {
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("tmd {} ({})", output.version, output.build);
    println!("GitHub API {} at {}", output.github_api_version, output.default_api_url);
    Ok(())
}
