//! Error types for the todomd CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (3=not_found, 4=validation, 6=remote, etc.)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use thiserror::Error;

/// Result type alias for todomd operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Not Found (exit 3)
    TodoNotFound,
    AmbiguousId,

    // Validation (exit 4)
    InvalidArgument,

    // Remote (exit 6)
    RemoteError,
    Conflict,

    // Config (exit 7)
    NotConfigured,
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::TodoNotFound => "TODO_NOT_FOUND",
            Self::AmbiguousId => "AMBIGUOUS_ID",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::RemoteError => "REMOTE_ERROR",
            Self::Conflict => "CONFLICT",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::TodoNotFound | Self::AmbiguousId => 3,
            Self::InvalidArgument => 4,
            Self::RemoteError | Self::Conflict => 6,
            Self::NotConfigured | Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether retrying (possibly with corrected input) may succeed.
    ///
    /// A conflict clears up after the next sync re-fetches the remote.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument | Self::AmbiguousId | Self::Conflict | Self::RemoteError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in todomd operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Todo not found: {id}")]
    TodoNotFound { id: String },

    #[error("Ambiguous todo id '{id}' (matches: {})", matches.join(", "))]
    AmbiguousId { id: String, matches: Vec<String> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Remote sync is not configured")]
    NotConfigured,

    #[error("GitHub API error: {status} {message}")]
    Remote { status: u16, message: String },

    #[error("Remote file changed since last fetch ({status})")]
    Conflict { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode remote content: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::TodoNotFound { .. } => ErrorCode::TodoNotFound,
            Self::AmbiguousId { .. } => ErrorCode::AmbiguousId,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::NotConfigured => ErrorCode::NotConfigured,
            Self::Remote { .. } | Self::Http(_) | Self::Decode(_) => ErrorCode::RemoteError,
            Self::Conflict { .. } => ErrorCode::Conflict,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::TodoNotFound { id } => Some(format!(
                "No todo with ID '{id}'. Use `tmd list` to see todo IDs."
            )),
            Self::AmbiguousId { .. } => {
                Some("Use a longer ID prefix to select a single todo.".to_string())
            }
            Self::NotConfigured => Some(
                "Set the repository and token first:\n  \
                 tmd config set --owner <owner> --repo <repo>\n  \
                 tmd config token <github-token>"
                    .to_string(),
            ),
            Self::Conflict { .. } => Some(
                "Someone else updated the remote file. Run `tmd sync` to re-fetch and merge."
                    .to_string(),
            ),
            Self::Remote { status: 401 | 403, .. } => Some(
                "Check the token with `tmd config test`. It needs contents read/write access."
                    .to_string(),
            ),
            Self::Remote { status: 404, .. } => {
                Some("Check owner, repo and branch with `tmd config show`.".to_string())
            }
            Self::Remote { .. }
            | Self::InvalidArgument(_)
            | Self::Http(_)
            | Self::Decode(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
