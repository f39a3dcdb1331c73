pub mod schema;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

/// Open (or create) the mentor-hub database at the given path, with the schema
/// initialized and the mentor personas seeded.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let mut conn = Connection::open(path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    // WAL keeps page reads from blocking on the single writer
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(std::time::Duration::from_millis(5000))?;

    prepare(&mut conn)?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Open an in-memory database with schema and seed data, for tests and dry runs.
pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    prepare(&mut conn)?;
    Ok(conn)
}

fn prepare(conn: &mut Connection) -> Result<()> {
    schema::init_schema(conn).context("failed to initialize schema")?;
    let seeded = crate::records::mentors::seed_default_mentors(conn)
        .context("failed to seed mentors")?;
    if seeded > 0 {
        tracing::info!(count = seeded, "seeded mentor personas");
    }
    Ok(())
}

/// Liveness check used by the health endpoint. Reads the mentors table,
/// so a connection without the schema counts as down.
pub fn ping(conn: &Connection) -> rusqlite::Result<()> {
    conn.query_row("SELECT COUNT(*) FROM mentors", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

/// Snapshot of database state used by `doctor`.
#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub integrity_ok: bool,
    pub integrity_details: String,
    pub schema_version: u32,
    pub mentor_count: u64,
    pub message_count: u64,
    pub task_count: u64,
    pub note_count: u64,
    pub event_count: u64,
}

/// Run `PRAGMA integrity_check` and collect row counts for every table.
pub fn check_database_health(conn: &Connection) -> Result<DatabaseHealth> {
    let integrity_details: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .context("integrity check failed to run")?;

    let count = |table: &str| -> Result<u64> {
        let n: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .with_context(|| format!("failed to count {table}"))?;
        Ok(n as u64)
    };

    Ok(DatabaseHealth {
        integrity_ok: integrity_details == "ok",
        schema_version: schema::get_schema_version(conn)?,
        mentor_count: count("mentors")?,
        message_count: count("chat_messages")?,
        task_count: count("tasks")?,
        note_count: count("notes")?,
        event_count: count("events")?,
        integrity_details,
    })
}
