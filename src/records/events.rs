use rusqlite::{params, Connection, Row};

use super::types::{Event, NewEvent};
use super::{
    now, parse_optional_date, parse_user_date, required_text, sql_date, sql_timestamp,
    RecordError, RecordResult,
};

const DEFAULT_EVENT_TYPE: &str = "meeting";

const EVENT_COLUMNS: &str = "id, title, description, start_date, end_date, event_type, created_at";

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        event_type: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// All events in calendar order.
pub fn list_events(conn: &Connection) -> RecordResult<Vec<Event>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_date, id"
    ))?;
    let events = stmt
        .query_map([], event_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(events)
}

pub fn create_event(conn: &mut Connection, new: &NewEvent) -> RecordResult<i64> {
    let title = required_text("title", &new.title)?;
    if new.start_date.trim().is_empty() {
        return Err(RecordError::validation("start_date is required"));
    }
    let start_date = parse_user_date("start_date", &new.start_date)?;
    let end_date = parse_optional_date("end_date", new.end_date.as_deref())?;
    if matches!(end_date, Some(end) if end < start_date) {
        return Err(RecordError::validation("end_date must not be before start_date"));
    }
    let event_type = match new.event_type.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_EVENT_TYPE.to_string(),
        Some(kind) => kind.to_string(),
    };

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO events (title, description, start_date, end_date, event_type, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            title,
            new.description.as_deref().unwrap_or_default(),
            sql_date(&start_date),
            end_date.as_ref().map(sql_date),
            event_type,
            sql_timestamp(&now()),
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    tracing::debug!(event_id = id, "event created");
    Ok(id)
}
