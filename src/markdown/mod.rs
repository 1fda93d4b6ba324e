//! Markdown document model.
//!
//! A document is an ordered list of lines. Lines that match the todo grammar
//! (see [`codec`]) become [`ParsedLine::Todo`]; everything else (headings,
//! blank lines, prose, other list styles) is kept verbatim as
//! [`ParsedLine::Raw`] so serializing never loses structure.
//!
//! # Example
//!
//! ```
//! use tmd::markdown::{parse, serialize};
//!
//! let doc = "# Todo\n- [_] Buy milk (id: 11111111-1111-4111-8111-111111111111)\n";
//! let parsed = parse(doc);
//! assert_eq!(parsed.todos().count(), 1);
//! assert_eq!(serialize(parsed.lines()), doc);
//! ```

pub mod codec;
pub mod due;

pub use codec::{decode_line, encode_todo, lacks_id};
pub use due::{reminder_at, upcoming, DueDate, Reminder};

use crate::model::TodoItem;

/// One line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// A checkbox todo line.
    Todo(TodoItem),
    /// Any other line, kept byte-for-byte.
    Raw(String),
}

impl ParsedLine {
    /// The todo on this line, if it is one.
    #[must_use]
    pub fn as_todo(&self) -> Option<&TodoItem> {
        match self {
            Self::Todo(todo) => Some(todo),
            Self::Raw(_) => None,
        }
    }

    /// Render this line as text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Todo(todo) => encode_todo(todo),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

/// A parsed document.
///
/// The line sequence is the only stored state; the todo list is derived from
/// it on every read so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
    lines: Vec<ParsedLine>,
}

impl ParsedFile {
    #[must_use]
    pub fn from_lines(lines: Vec<ParsedLine>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[ParsedLine] {
        &self.lines
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<ParsedLine> {
        self.lines
    }

    /// Todos in document order.
    pub fn todos(&self) -> impl Iterator<Item = &TodoItem> {
        self.lines.iter().filter_map(ParsedLine::as_todo)
    }

    /// Owned copy of the todo view.
    #[must_use]
    pub fn todo_items(&self) -> Vec<TodoItem> {
        self.todos().cloned().collect()
    }

    /// Serialize back to document text.
    #[must_use]
    pub fn to_content(&self) -> String {
        serialize(&self.lines)
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&TodoItem> {
        self.todos().find(|t| t.id == id)
    }

    /// New document with `todo` added as the last todo.
    ///
    /// It goes before a trailing empty line so a final newline stays final.
    #[must_use]
    pub fn with_appended(&self, todo: TodoItem) -> Self {
        let mut lines = self.lines.clone();
        let at = trailing_insert_index(&lines);
        lines.insert(at, ParsedLine::Todo(todo));
        Self { lines }
    }

    /// New document with the todo `id` replaced by `update(todo)`.
    ///
    /// Returns `None` if no todo has that id. Every other line is cloned
    /// untouched.
    #[must_use]
    pub fn with_updated(&self, id: &str, update: impl FnOnce(&TodoItem) -> TodoItem) -> Option<Self> {
        let index = self.position(id)?;
        let updated = update(self.lines[index].as_todo()?);
        let mut lines = self.lines.clone();
        lines[index] = ParsedLine::Todo(updated);
        Some(Self { lines })
    }

    /// New document without the todo `id`, or `None` if it is absent.
    #[must_use]
    pub fn without(&self, id: &str) -> Option<Self> {
        let index = self.position(id)?;
        let mut lines = self.lines.clone();
        lines.remove(index);
        Some(Self { lines })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.as_todo().is_some_and(|t| t.id == id))
    }
}

/// Where to insert lines that belong at the end of a document: before a
/// final empty raw line (the trailing newline), otherwise at the very end.
pub(crate) fn trailing_insert_index(lines: &[ParsedLine]) -> usize {
    match lines.last() {
        Some(ParsedLine::Raw(raw)) if raw.is_empty() => lines.len() - 1,
        _ => lines.len(),
    }
}

/// Parse document text into lines.
///
/// Splits on `\n` only, so a trailing newline produces a final empty raw
/// line and survives the round trip.
#[must_use]
pub fn parse(content: &str) -> ParsedFile {
    let lines = content
        .split('\n')
        .map(|raw| match decode_line(raw) {
            Some(todo) => ParsedLine::Todo(todo),
            None => ParsedLine::Raw(raw.to_string()),
        })
        .collect();
    ParsedFile { lines }
}

/// Whether any todo line in `content` has no stored id.
///
/// Parsing such a document invents ids that exist nowhere else, so it has
/// to be written back before those ids can be relied on.
#[must_use]
pub fn has_unstored_ids(content: &str) -> bool {
    content.split('\n').any(lacks_id)
}

/// Serialize lines back to document text.
#[must_use]
pub fn serialize(lines: &[ParsedLine]) -> String {
    lines
        .iter()
        .map(ParsedLine::render)
        .collect::<Vec<_>>()
        .join("\n")
}
