//! Append-only chat log. Each row is one stateless exchange; history is only
//! ever read back for display, never fed into generation.

use rusqlite::{params, Connection, Row};

use super::mentors::mentor_exists;
use super::types::ChatMessage;
use super::{now, sql_timestamp, RecordError, RecordResult};

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<ChatMessage> {
    Ok(ChatMessage {
        id: row.get(0)?,
        mentor_id: row.get(1)?,
        user_message: row.get(2)?,
        mentor_response: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

/// Persist one exchange for `mentor_id`.
pub fn append_message(
    conn: &mut Connection,
    mentor_id: i64,
    user_message: &str,
    mentor_response: &str,
) -> RecordResult<ChatMessage> {
    let tx = conn.transaction()?;

    if !mentor_exists(&tx, mentor_id)? {
        return Err(RecordError::NotFound { kind: "mentor", id: mentor_id });
    }

    let timestamp = now();
    tx.execute(
        "INSERT INTO chat_messages (mentor_id, user_message, mentor_response, timestamp) \
         VALUES (?1, ?2, ?3, ?4)",
        params![mentor_id, user_message, mentor_response, sql_timestamp(&timestamp)],
    )?;
    let id = tx.last_insert_rowid();

    tx.commit()?;

    Ok(ChatMessage {
        id,
        mentor_id,
        user_message: user_message.to_string(),
        mentor_response: mentor_response.to_string(),
        timestamp,
    })
}

/// All exchanges with one mentor, oldest first.
pub fn history(conn: &Connection, mentor_id: i64) -> RecordResult<Vec<ChatMessage>> {
    let mut stmt = conn.prepare(
        "SELECT id, mentor_id, user_message, mentor_response, timestamp \
         FROM chat_messages WHERE mentor_id = ?1 ORDER BY timestamp, id",
    )?;
    let messages = stmt
        .query_map(params![mentor_id], message_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_chronological_and_scoped() {
        let mut conn = crate::db::open_in_memory().unwrap();
        append_message(&mut conn, 1, "first", "one").unwrap();
        append_message(&mut conn, 2, "elsewhere", "other").unwrap();
        append_message(&mut conn, 1, "second", "two").unwrap();

        let messages = history(&conn, 1).unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.user_message.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert!(messages[0].timestamp <= messages[1].timestamp);
    }

    #[test]
    fn append_for_unknown_mentor_fails_and_writes_nothing() {
        let mut conn = crate::db::open_in_memory().unwrap();
        let err = append_message(&mut conn, 42, "hi", "hello").unwrap_err();
        assert!(matches!(err, RecordError::NotFound { kind: "mentor", .. }));

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM chat_messages", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
