//! Persistence layer for mentors, chat messages, tasks, notes, and events.
//!
//! Every mutating function opens its own transaction; an error anywhere inside
//! drops the transaction and SQLite rolls the whole operation back.

pub mod chat;
pub mod events;
pub mod mentors;
pub mod notes;
pub mod stats;
pub mod tasks;
pub mod types;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, SubsecRound, Utc};

/// Errors surfaced by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i64 },
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl RecordError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type RecordResult<T> = Result<T, RecordError>;

/// Current UTC time, truncated to the microsecond precision that is persisted.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A timestamp strictly later than `previous`, normally just [`now`].
pub(crate) fn advance_past(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

/// Fixed-width storage form, so text ordering in SQL is chronological.
pub(crate) fn sql_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

pub(crate) fn sql_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S").to_string()
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a user-supplied calendar date. Accepts plain dates, ISO-8601 local
/// date-times with or without seconds, and RFC 3339 (normalized to UTC).
pub fn parse_user_date(field: &str, raw: &str) -> RecordResult<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(RecordError::validation(format!(
        "{field} is not a valid ISO-8601 date: {raw}"
    )))
}

/// Treat an empty (or whitespace-only) optional date as absent.
pub(crate) fn parse_optional_date(
    field: &str,
    raw: Option<&str>,
) -> RecordResult<Option<NaiveDateTime>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_user_date(field, value).map(Some),
    }
}

/// Trim a required text field and reject it when nothing is left.
pub(crate) fn required_text(field: &str, value: &str) -> RecordResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
