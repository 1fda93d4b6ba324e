//! Todo command implementations: list, add, toggle, edit, delete.

use super::{runtime, Workspace};
use crate::cli::{AddArgs, EditArgs};
use crate::error::Result;
use crate::model::{TodoItem, TodoPatch};
use crate::remote::GitHubClient;
use crate::sync::TodoSession;
use crate::validate::{due_date_warning, normalize_field, normalize_name};
use colored::Colorize;
use serde::Serialize;
use tracing::warn;

/// Output for todo list.
#[derive(Serialize)]
struct ListOutput<'a> {
    todos: Vec<&'a TodoItem>,
    count: usize,
}

/// Output for a single mutation.
#[derive(Serialize)]
struct MutationOutput<'a> {
    action: &'a str,
    todo: &'a TodoItem,
}

/// Which todos `list` shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Pending,
    Done,
}

impl ListFilter {
    #[must_use]
    pub fn from_flags(pending: bool, done: bool) -> Self {
        match (pending, done) {
            (true, _) => Self::Pending,
            (_, true) => Self::Done,
            _ => Self::All,
        }
    }

    fn keeps(self, todo: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !todo.done,
            Self::Done => todo.done,
        }
    }
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the document cannot be read.
pub fn list(workspace: &Workspace, filter: ListFilter, json: bool) -> Result<()> {
    let session = workspace.open(false)?;
    let todos: Vec<&TodoItem> = session.file().todos().filter(|t| filter.keeps(t)).collect();

    if json {
        let output = ListOutput {
            count: todos.len(),
            todos,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if todos.is_empty() {
        println!("No todos.");
        return Ok(());
    }

    for todo in todos {
        println!("{}", render(todo));
    }
    Ok(())
}

fn render(todo: &TodoItem) -> String {
    let mark = if todo.done {
        "[x]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    let name = if todo.done {
        todo.name.dimmed().to_string()
    } else {
        todo.name.clone()
    };

    let mut line = format!("{mark} {} {name}", todo.short_id().dimmed());
    if let Some(due) = &todo.due_date {
        line.push_str(&format!(" {}", format!("due {due}").yellow()));
    }
    if let Some(recurrence) = &todo.recurrence {
        line.push_str(&format!(" {}", format!("({recurrence})").cyan()));
    }
    line
}

/// Execute the add command.
///
/// # Errors
///
/// Returns an error on invalid input or if the document cannot be written.
pub fn add(workspace: &Workspace, args: &AddArgs, offline: bool, json: bool) -> Result<()> {
    let mut todo = TodoItem::new(normalize_name(&args.name)?);
    todo.due_date = args
        .due
        .as_deref()
        .map(|d| normalize_field("Due date", d))
        .transpose()?;
    todo.recurrence = args
        .recurrence
        .as_deref()
        .map(|r| normalize_field("Recurrence", r))
        .transpose()?;
    warn_unparseable_due(&todo);

    let mut session = workspace.open(!offline)?;
    let todo = session.add(todo)?;
    push_after_edit(&mut session)?;
    report("added", &todo, json)
}

/// Execute the toggle command.
///
/// # Errors
///
/// Returns an error if the id does not resolve or the write fails.
pub fn toggle(workspace: &Workspace, id: &str, offline: bool, json: bool) -> Result<()> {
    let mut session = workspace.open(!offline)?;
    let todo = session.toggle(id)?;
    push_after_edit(&mut session)?;
    report(if todo.done { "done" } else { "reopened" }, &todo, json)
}

/// Execute the edit command.
///
/// # Errors
///
/// Returns an error on invalid input, an unknown id, or a failed write.
pub fn edit(workspace: &Workspace, args: &EditArgs, offline: bool, json: bool) -> Result<()> {
    let patch = patch_from_args(args)?;

    let mut session = workspace.open(!offline)?;
    let todo = session.edit(&args.id, &patch)?;
    warn_unparseable_due(&todo);
    push_after_edit(&mut session)?;
    report("edited", &todo, json)
}

fn patch_from_args(args: &EditArgs) -> Result<TodoPatch> {
    let name = args.name.as_deref().map(normalize_name).transpose()?;

    let due_date = if args.clear_due {
        Some(None)
    } else {
        args.due
            .as_deref()
            .map(|d| normalize_field("Due date", d).map(Some))
            .transpose()?
    };

    let recurrence = if args.clear_recurrence {
        Some(None)
    } else {
        args.recurrence
            .as_deref()
            .map(|r| normalize_field("Recurrence", r).map(Some))
            .transpose()?
    };

    Ok(TodoPatch {
        name,
        due_date,
        recurrence,
    })
}

/// Execute the delete command.
///
/// # Errors
///
/// Returns an error if the id does not resolve or the write fails.
pub fn delete(workspace: &Workspace, id: &str, offline: bool, json: bool) -> Result<()> {
    let mut session = workspace.open(!offline)?;
    let todo = session.delete(id)?;
    push_after_edit(&mut session)?;
    report("deleted", &todo, json)
}

fn warn_unparseable_due(todo: &TodoItem) {
    if let Some(message) = todo.due_date.as_deref().and_then(due_date_warning) {
        warn!("{message}");
    }
}

fn push_after_edit(session: &mut TodoSession<GitHubClient>) -> Result<()> {
    if !session.has_remote() {
        return Ok(());
    }
    runtime()?.block_on(session.push_after_edit());
    Ok(())
}

fn report(action: &str, todo: &TodoItem, json: bool) -> Result<()> {
    if crate::is_silent() {
        println!("{}", todo.id);
        return Ok(());
    }

    if json {
        let output = MutationOutput { action, todo };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let verb = match action {
            "added" => "Added",
            "done" => "Completed",
            "reopened" => "Reopened",
            "edited" => "Updated",
            _ => "Deleted",
        };
        println!("{verb}: {} {}", todo.short_id().dimmed(), todo.name);
    }
    Ok(())
}
