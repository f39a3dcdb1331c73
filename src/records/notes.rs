use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::{NewNote, Note, NoteUpdate};
use super::{advance_past, now, required_text, sql_timestamp, RecordError, RecordResult};

const DEFAULT_CATEGORY: &str = "general";

const NOTE_COLUMNS: &str = "id, title, content, category, tags, created_at, updated_at";

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        category: row.get(3)?,
        tags: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// All notes, most recently touched first.
pub fn list_notes(conn: &Connection) -> RecordResult<Vec<Note>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes ORDER BY updated_at DESC, created_at DESC, id DESC"
    ))?;
    let notes = stmt
        .query_map([], note_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notes)
}

pub fn get_note(conn: &Connection, id: i64) -> RecordResult<Note> {
    conn.query_row(
        &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
        params![id],
        note_from_row,
    )
    .optional()?
    .ok_or(RecordError::NotFound { kind: "note", id })
}

/// Blank categories file the note under [`DEFAULT_CATEGORY`].
fn normalize_category(raw: &str) -> String {
    match raw.trim() {
        "" => DEFAULT_CATEGORY.to_string(),
        category => category.to_string(),
    }
}

pub fn create_note(conn: &mut Connection, new: &NewNote) -> RecordResult<i64> {
    let title = required_text("title", &new.title)?;
    let category = normalize_category(new.category.as_deref().unwrap_or_default());
    let created = sql_timestamp(&now());

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO notes (title, content, category, tags, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![
            title,
            new.content.as_deref().unwrap_or_default(),
            category,
            new.tags.as_deref().unwrap_or_default(),
            created,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    tracing::debug!(note_id = id, "note created");
    Ok(id)
}

/// Apply the fields present in `update` and move `updated_at` forward, even when
/// no field changed.
pub fn update_note(conn: &mut Connection, id: i64, update: &NoteUpdate) -> RecordResult<Note> {
    let tx = conn.transaction()?;
    let mut note = get_note(&tx, id)?;

    if let Some(title) = &update.title {
        note.title = required_text("title", title)?;
    }
    if let Some(content) = &update.content {
        note.content = content.clone();
    }
    if let Some(category) = &update.category {
        note.category = normalize_category(category);
    }
    if let Some(tags) = &update.tags {
        note.tags = tags.clone();
    }
    note.updated_at = advance_past(note.updated_at);

    tx.execute(
        "UPDATE notes SET title = ?1, content = ?2, category = ?3, tags = ?4, updated_at = ?5 \
         WHERE id = ?6",
        params![
            note.title,
            note.content,
            note.category,
            note.tags,
            sql_timestamp(&note.updated_at),
            note.id,
        ],
    )?;
    tx.commit()?;
    Ok(note)
}

pub fn delete_note(conn: &mut Connection, id: i64) -> RecordResult<()> {
    let tx = conn.transaction()?;
    let rows = tx.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(RecordError::NotFound { kind: "note", id });
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn create_defaults_category_to_general() {
        let mut conn = crate::db::open_in_memory().unwrap();
        let id = create_note(&mut conn, &draft("Ideas")).unwrap();
        let note = get_note(&conn, id).unwrap();
        assert_eq!(note.category, "general");
        assert_eq!(note.tags, "");
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn update_touches_only_given_fields() {
        let mut conn = crate::db::open_in_memory().unwrap();
        let new = NewNote {
            title: "Groceries".into(),
            content: Some("milk".into()),
            category: Some("home".into()),
            tags: Some("shopping".into()),
        };
        let id = create_note(&mut conn, &new).unwrap();
        let before = get_note(&conn, id).unwrap();

        let update = NoteUpdate {
            content: Some("milk, eggs".into()),
            ..Default::default()
        };
        let after = update_note(&mut conn, id, &update).unwrap();

        assert_eq!(after.content, "milk, eggs");
        assert_eq!(after.title, before.title);
        assert_eq!(after.category, before.category);
        assert_eq!(after.tags, before.tags);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[test]
    fn blank_category_on_update_resets_to_general() {
        let mut conn = crate::db::open_in_memory().unwrap();
        let new = NewNote {
            category: Some("work".into()),
            ..draft("Standup notes")
        };
        let id = create_note(&mut conn, &new).unwrap();

        let update = NoteUpdate {
            category: Some("   ".into()),
            ..Default::default()
        };
        let after = update_note(&mut conn, id, &update).unwrap();
        assert_eq!(after.category, "general");

        let update = NoteUpdate {
            category: Some("  home ".into()),
            ..Default::default()
        };
        let after = update_note(&mut conn, id, &update).unwrap();
        assert_eq!(after.category, "home");
        assert_eq!(get_note(&conn, id).unwrap().category, "home");
    }

    #[test]
    fn empty_update_still_advances_timestamp() {
        let mut conn = crate::db::open_in_memory().unwrap();
        let id = create_note(&mut conn, &draft("Journal")).unwrap();

        let first = update_note(&mut conn, id, &NoteUpdate::default()).unwrap();
        let second = update_note(&mut conn, id, &NoteUpdate::default()).unwrap();
        assert!(second.updated_at > first.updated_at);
        assert_eq!(get_note(&conn, id).unwrap().updated_at, second.updated_at);
    }

    #[test]
    fn delete_missing_note_is_not_found() {
        let mut conn = crate::db::open_in_memory().unwrap();
        let err = delete_note(&mut conn, 12).unwrap_err();
        assert!(matches!(err, RecordError::NotFound { kind: "note", id: 12 }));
    }
}
