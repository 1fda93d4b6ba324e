//! Input validation for todo fields.
//!
//! Everything written into a todo has to come back out of the line grammar
//! unchanged, so names and field values are checked before any mutation
//! touches the document.

use crate::error::{Error, Result};
use crate::markdown::{decode_line, encode_todo, DueDate};
use crate::model::TodoItem;

/// Trim a todo name and reject names the document cannot hold.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an empty name or one spanning
/// several lines.
pub fn normalize_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument("Todo name cannot be empty".into()));
    }
    if name.contains(['\n', '\r']) {
        return Err(Error::InvalidArgument(
            "Todo name must be a single line".into(),
        ));
    }
    Ok(name.to_string())
}

/// Trim an optional field value (`due`, `recurrence`).
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the value is empty, spans lines, or
/// contains `)` which would end the field group early.
pub fn normalize_field(label: &str, input: &str) -> Result<String> {
    let value = input.trim();
    if value.is_empty() {
        return Err(Error::InvalidArgument(format!("{label} cannot be empty")));
    }
    if value.contains(['\n', '\r']) {
        return Err(Error::InvalidArgument(format!(
            "{label} must be a single line"
        )));
    }
    if value.contains(')') {
        return Err(Error::InvalidArgument(format!(
            "{label} cannot contain ')'"
        )));
    }
    Ok(value.to_string())
}

/// Check that `todo` encodes to a line that decodes to the same todo.
///
/// Catches names that would be read back as field groups, e.g.
/// `Meet (due: friday)`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] describing the first field that
/// would not survive.
pub fn check_round_trip(todo: &TodoItem) -> Result<()> {
    let line = encode_todo(todo);
    match decode_line(&line) {
        Some(decoded) if decoded == *todo => Ok(()),
        Some(decoded) if decoded.name != todo.name => Err(Error::InvalidArgument(format!(
            "Name '{}' would be read back as '{}'",
            todo.name, decoded.name
        ))),
        Some(_) => Err(Error::InvalidArgument(format!(
            "Todo fields would not survive being written: {line}"
        ))),
        None => Err(Error::InvalidArgument(format!(
            "'{}' is not a valid todo",
            todo.name
        ))),
    }
}

/// Full check of a todo about to be written.
///
/// # Errors
///
/// Propagates the first failing check.
pub fn validate_todo(todo: &TodoItem) -> Result<()> {
    normalize_name(&todo.name)?;
    if let Some(due) = &todo.due_date {
        normalize_field("Due date", due)?;
    }
    if let Some(recurrence) = &todo.recurrence {
        normalize_field("Recurrence", recurrence)?;
    }
    check_round_trip(todo)
}

/// Warning text for a due date no reminder can be computed from.
///
/// Such dates are still stored; they just never show up in `upcoming`.
#[must_use]
pub fn due_date_warning(due: &str) -> Option<String> {
    DueDate::parse(due).is_none().then(|| {
        format!(
            "Due date '{due}' is not YYYY-MM-DD or YYYY-MM-DD H:MM AM|PM; no reminder will be scheduled"
        )
    })
}
