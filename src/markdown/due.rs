//! Due dates and reminder times.
//!
//! Due dates are stored as free-form strings, but two forms are understood:
//! `YYYY-MM-DD` and `YYYY-MM-DD H:MM AM|PM`. Anything else is simply not
//! eligible for reminders.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::model::TodoItem;

/// Date-only due dates are treated as due at this hour.
const DATE_ONLY_HOUR: u32 = 9;
/// Date-only reminders fire the evening before, at this hour.
const EVENING_HOUR: u32 = 18;
/// Timed reminders fire this many minutes ahead.
const LEAD_MINUTES: i64 = 30;

/// A parsed due date in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDate {
    pub at: NaiveDateTime,
    pub has_time: bool,
}

impl DueDate {
    /// Parse either supported form. Invalid calendar dates yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some((date, time)) = s.split_once(char::is_whitespace) {
            let date = parse_date(date)?;
            let time = parse_clock(time.trim_start())?;
            return Some(Self {
                at: date.and_time(time),
                has_time: true,
            });
        }

        let date = parse_date(s)?;
        Some(Self {
            at: date.and_hms_opt(DATE_ONLY_HOUR, 0, 0)?,
            has_time: false,
        })
    }
}

/// Strict `YYYY-MM-DD`.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let year = digits(parts.next()?, 4, 4)?;
    let month = digits(parts.next()?, 2, 2)?;
    let day = digits(parts.next()?, 2, 2)?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// `H:MM AM` / `HH:MM pm`.
fn parse_clock(s: &str) -> Option<NaiveTime> {
    let (clock, period) = s.split_once(char::is_whitespace)?;
    let (hour, minute) = clock.split_once(':')?;
    let hour = digits(hour, 1, 2)?;
    let minute = digits(minute, 2, 2)?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = match period.to_ascii_uppercase().as_str() {
        "AM" if hour == 12 => 0,
        "AM" => hour,
        "PM" if hour == 12 => 12,
        "PM" => hour + 12,
        _ => return None,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn digits(s: &str, min: usize, max: usize) -> Option<u32> {
    if s.len() < min || s.len() > max || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// When to remind about something due at `due`, as seen at `now`.
///
/// Nothing for past due dates. Timed items remind 30 minutes ahead,
/// date-only items at 18:00 the evening before; if that moment has already
/// passed, the reminder falls back to the due time itself.
#[must_use]
pub fn reminder_at(due: &DueDate, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if due.at <= now {
        return None;
    }

    let early = if due.has_time {
        due.at - Duration::minutes(LEAD_MINUTES)
    } else {
        (due.at.date() - Duration::days(1)).and_hms_opt(EVENING_HOUR, 0, 0)?
    };

    Some(if early > now { early } else { due.at })
}

/// A pending todo with a computed reminder time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub todo: TodoItem,
    pub due_at: NaiveDateTime,
    pub remind_at: NaiveDateTime,
}

/// Reminders for every pending todo with a usable future due date,
/// soonest first.
#[must_use]
pub fn upcoming<'a>(todos: impl IntoIterator<Item = &'a TodoItem>, now: NaiveDateTime) -> Vec<Reminder> {
    let mut reminders: Vec<Reminder> = todos
        .into_iter()
        .filter(|todo| !todo.done)
        .filter_map(|todo| {
            let due = DueDate::parse(todo.due_date.as_deref()?)?;
            let remind_at = reminder_at(&due, now)?;
            Some(Reminder {
                todo: todo.clone(),
                due_at: due.at,
                remind_at,
            })
        })
        .collect();
    reminders.sort_by_key(|r| r.remind_at);
    reminders
}
