//! Todo item model.
//!
//! A todo is one checkbox line in the markdown document. Its identifier is
//! embedded in the line itself and is the only key used to match a todo
//! between the local and remote copies.

use serde::{Deserialize, Serialize};

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Stable identifier (UUID format). Never changes once assigned.
    pub id: String,

    /// Display name
    pub name: String,

    /// Completion flag
    pub done: bool,

    /// `YYYY-MM-DD` or `YYYY-MM-DD HH:MM AM|PM`, kept as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Free-form recurrence label (e.g. "weekly")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
}

impl TodoItem {
    /// Create a pending todo with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            done: false,
            due_date: None,
            recurrence: None,
        }
    }

    /// Short id for display (first 8 hex digits).
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// Field changes for an existing todo. `None` leaves a field alone;
/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub name: Option<String>,
    pub due_date: Option<Option<String>>,
    pub recurrence: Option<Option<String>>,
}

impl TodoPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.due_date.is_none() && self.recurrence.is_none()
    }

    /// The patched copy of `todo`. The id and done flag never change here.
    #[must_use]
    pub fn apply(&self, todo: &TodoItem) -> TodoItem {
        TodoItem {
            id: todo.id.clone(),
            name: self.name.clone().unwrap_or_else(|| todo.name.clone()),
            done: todo.done,
            due_date: self.due_date.clone().unwrap_or_else(|| todo.due_date.clone()),
            recurrence: self
                .recurrence
                .clone()
                .unwrap_or_else(|| todo.recurrence.clone()),
        }
    }
}

/// Generate a new random todo identifier.
///
/// Lowercase 8-4-4-4-12 hex with the version nibble set to 4.
#[must_use]
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Check that a string is a well-formed generated identifier.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    uuid::Uuid::try_parse(id).is_ok_and(|u| {
        u.get_version_num() == 4 && u.hyphenated().to_string() == id
    })
}
