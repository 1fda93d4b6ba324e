//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// todomd - a markdown todo list synced with a GitHub repository
#[derive(Parser, Debug)]
#[command(name = "tmd", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: ~/.todomd)
    #[arg(long, global = true, env = "TMD_HOME")]
    pub home: Option<PathBuf>,

    /// Todo document path (default: <home>/todo.md)
    #[arg(long, global = true, env = "TMD_FILE")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output only the todo ID
    #[arg(long, global = true)]
    pub silent: bool,

    /// Do not push to the remote after editing
    #[arg(long, global = true)]
    pub offline: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List todos
    #[command(alias = "ls")]
    List {
        /// Only todos not yet done
        #[arg(long, conflicts_with = "done")]
        pending: bool,

        /// Only finished todos
        #[arg(long)]
        done: bool,
    },

    /// Add a todo
    Add(AddArgs),

    /// Mark a todo done, or not done again
    #[command(alias = "done")]
    Toggle {
        /// Todo ID or unique prefix
        id: String,
    },

    /// Change a todo's name, due date, or recurrence
    Edit(EditArgs),

    /// Delete a todo
    #[command(alias = "rm")]
    Delete {
        /// Todo ID or unique prefix
        id: String,
    },

    /// Reconcile the local document with the remote copy
    Sync,

    /// Show document and sync status
    Status,

    /// List pending todos with an upcoming reminder
    Upcoming,

    /// Remote repository settings and credentials
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Todo text
    pub name: String,

    /// Due date: YYYY-MM-DD or "YYYY-MM-DD H:MM AM|PM"
    #[arg(long)]
    pub due: Option<String>,

    /// Recurrence label (e.g. weekly)
    #[arg(long)]
    pub recurrence: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Todo ID or unique prefix
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New due date
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,

    /// New recurrence label
    #[arg(long, conflicts_with = "clear_recurrence")]
    pub recurrence: Option<String>,

    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,

    /// Remove the recurrence
    #[arg(long)]
    pub clear_recurrence: bool,
}

// ============================================================================
// Config Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,

    /// Update repository settings
    Set(ConfigSetArgs),

    /// Store the GitHub token, or remove it when no value is given
    Token {
        /// Personal access token with contents read/write access
        value: Option<String>,
    },

    /// Check that the repository is reachable with the stored token
    Test,
}

#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Repository owner (user or organization)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Branch holding the document
    #[arg(long)]
    pub branch: Option<String>,

    /// Path of the document inside the repository
    #[arg(long)]
    pub path: Option<String>,

    /// API base URL (for GitHub Enterprise)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ConfigSetArgs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
            && self.repo.is_none()
            && self.branch.is_none()
            && self.path.is_none()
            && self.api_url.is_none()
            && self.timeout.is_none()
    }
}
