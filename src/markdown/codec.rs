//! Single-line todo grammar.
//!
//! A todo line looks like:
//!
//! ```text
//! - [x] Buy milk (due: 2024-01-02) (recurrence: weekly) (id: 11111111-1111-4111-8111-111111111111)
//! ```
//!
//! The mark is `x`/`X` (done) or `_`/space (pending). The `due`,
//! `recurrence` and `id` groups are optional on input and always appear in
//! that order. A trailing period is ignored. Lines without an id get a
//! fresh one, which is how hand-written lines enter the system.
//!
//! Optional groups are matched from the end of the line. When the name
//! itself contains text shaped like a group, only the trailing group counts
//! and everything before it stays in the name.

use crate::model::{generate_id, TodoItem};

const DUE_FIELD: &[&str] = &["due"];
/// `reccurence` is what older writers emitted; accepted on read only.
const RECURRENCE_FIELD: &[&str] = &["recurrence", "reccurence"];
const ID_FIELD: &[&str] = &["id"];

/// Decode one line into a todo, or `None` if it is not a todo line.
#[must_use]
pub fn decode_line(raw: &str) -> Option<TodoItem> {
    decode(raw).map(|(todo, _)| todo)
}

/// Whether `raw` is a todo line without a stored `(id: …)` group.
///
/// Such a line gets a different id each time it is decoded.
#[must_use]
pub fn lacks_id(raw: &str) -> bool {
    matches!(decode(raw), Some((_, false)))
}

/// Decode a todo line and report whether its id was read from the line.
fn decode(raw: &str) -> Option<(TodoItem, bool)> {
    let line = raw.trim_start();
    if line.contains(['\r', '\n']) {
        return None;
    }

    let rest = line.strip_prefix("- [")?;
    let mut chars = rest.chars();
    let done = match chars.next()? {
        'x' | 'X' => true,
        '_' | ' ' => false,
        _ => return None,
    };
    let body = chars.as_str().strip_prefix("] ")?;

    // The name must keep at least one character, so a lone "." is a name.
    let mut name = match body.strip_suffix('.') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => body,
    };
    if name.is_empty() {
        return None;
    }

    let id = take_field(&mut name, ID_FIELD, is_id_value);
    let recurrence = take_field(&mut name, RECURRENCE_FIELD, |_| true);
    let due_date = take_field(&mut name, DUE_FIELD, |_| true);

    let todo = TodoItem {
        id: id.map_or_else(generate_id, str::to_string),
        name: name.to_string(),
        done,
        due_date: due_date.map(str::to_string),
        recurrence: recurrence.map(str::to_string),
    };
    Some((todo, id.is_some()))
}

/// Render a todo in canonical form.
#[must_use]
pub fn encode_todo(todo: &TodoItem) -> String {
    let check = if todo.done { 'x' } else { '_' };
    let mut line = format!("- [{check}] {}", todo.name);
    if let Some(due) = &todo.due_date {
        line.push_str(&format!(" (due: {due})"));
    }
    if let Some(recurrence) = &todo.recurrence {
        line.push_str(&format!(" (recurrence: {recurrence})"));
    }
    line.push_str(&format!(" (id: {})", todo.id));
    line
}

/// Peel a trailing ` (<field>: <value>)` group off `text`.
///
/// On success `text` is shortened to what precedes the group and the value
/// is returned. The earliest opening that still leaves a non-empty name
/// wins, matching a shortest-name reading of the grammar.
fn take_field<'a>(
    text: &mut &'a str,
    fields: &[&str],
    valid: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    let current: &'a str = *text;
    let inner = current.strip_suffix(')')?;
    // Values never contain ')', so the group opens after the last one.
    let floor = inner.rfind(')').map_or(0, |i| i + 1);

    for (offset, _) in inner[floor..].match_indices('(') {
        let open = floor + offset;
        let before = &inner[..open];
        let Some(space) = before.chars().next_back().filter(|c| c.is_whitespace()) else {
            continue;
        };
        let name = &before[..before.len() - space.len_utf8()];
        if name.is_empty() {
            continue;
        }

        let group = &inner[open + 1..];
        let value = fields.iter().find_map(|field| {
            group
                .strip_prefix(*field)
                .and_then(|g| g.strip_prefix(": "))
                .filter(|v| !v.is_empty() && valid(*v))
        });
        if let Some(value) = value {
            *text = name;
            return Some(value);
        }
    }
    None
}

fn is_id_value(value: &str) -> bool {
    value.len() == 36 && value.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}
