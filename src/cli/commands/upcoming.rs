//! Upcoming reminders.

use super::Workspace;
use crate::error::Result;
use crate::markdown::{upcoming, Reminder};
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct UpcomingOutput {
    reminders: Vec<Reminder>,
    count: usize,
}

/// Execute the upcoming command: pending todos with a reminder still ahead,
/// soonest first.
///
/// # Errors
///
/// Returns an error if the document cannot be read.
pub fn execute(workspace: &Workspace, json: bool) -> Result<()> {
    let session = workspace.open(false)?;
    let now = chrono::Local::now().naive_local();
    let reminders = upcoming(session.file().todos(), now);

    if json {
        let output = UpcomingOutput {
            count: reminders.len(),
            reminders,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if reminders.is_empty() {
        println!("No upcoming reminders.");
        return Ok(());
    }

    for reminder in &reminders {
        println!(
            "{} {} {}",
            reminder.remind_at.format("%Y-%m-%d %H:%M").to_string().yellow(),
            reminder.todo.name,
            format!("(due {})", reminder.due_at.format("%Y-%m-%d %H:%M")).dimmed()
        );
    }
    Ok(())
}
