//! Task CRUD with automatic completion bookkeeping.
//!
//! `completed_at` is owned by this module: callers only ever set `status`, and
//! [`reconcile_completion`] derives the timestamp so that it is present exactly
//! while the task is completed.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};

use super::mentors::mentor_exists;
use super::types::{NewTask, Task, TaskStatus, TaskUpdate};
use super::{
    now, parse_optional_date, required_text, sql_date, sql_timestamp, RecordError, RecordResult,
};

const TASK_COLUMNS: &str =
    "id, title, description, priority, status, due_date, created_at, completed_at, mentor_id";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: row.get(3)?,
        status: row.get(4)?,
        due_date: row.get(5)?,
        created_at: row.get(6)?,
        completed_at: row.get(7)?,
        mentor_id: row.get(8)?,
    })
}

/// Completion timestamp implied by `status`.
///
/// Completed tasks keep an existing timestamp, otherwise get one no earlier than
/// `created_at`. Any other status clears it.
pub fn reconcile_completion(
    status: TaskStatus,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match status {
        TaskStatus::Completed => Some(completed_at.unwrap_or_else(|| now().max(created_at))),
        TaskStatus::Pending | TaskStatus::InProgress => None,
    }
}

/// All tasks, newest first.
pub fn list_tasks(conn: &Connection) -> RecordResult<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"
    ))?;
    let tasks = stmt
        .query_map([], task_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn get_task(conn: &Connection, id: i64) -> RecordResult<Task> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        params![id],
        task_from_row,
    )
    .optional()?
    .ok_or(RecordError::NotFound { kind: "task", id })
}

/// Insert a task with defaults applied (`pending`, `medium`, empty description).
/// Returns the new task id.
pub fn create_task(conn: &mut Connection, new: &NewTask) -> RecordResult<i64> {
    let title = required_text("title", &new.title)?;
    let due_date = parse_optional_date("due_date", new.due_date.as_deref())?;

    let tx = conn.transaction()?;

    if let Some(mentor_id) = new.mentor_id {
        if !mentor_exists(&tx, mentor_id)? {
            return Err(RecordError::validation(format!("mentor not found: {mentor_id}")));
        }
    }

    tx.execute(
        "INSERT INTO tasks (title, description, priority, status, due_date, created_at, mentor_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            title,
            new.description.as_deref().unwrap_or_default(),
            new.priority.unwrap_or_default(),
            TaskStatus::Pending,
            due_date.as_ref().map(sql_date),
            sql_timestamp(&now()),
            new.mentor_id,
        ],
    )?;
    let id = tx.last_insert_rowid();

    tx.commit()?;
    tracing::debug!(task_id = id, "task created");
    Ok(id)
}

/// Apply the fields present in `update`. Returns the task as stored afterwards.
pub fn update_task(conn: &mut Connection, id: i64, update: &TaskUpdate) -> RecordResult<Task> {
    let tx = conn.transaction()?;
    let mut task = get_task(&tx, id)?;

    if let Some(title) = &update.title {
        task.title = required_text("title", title)?;
    }
    if let Some(description) = &update.description {
        task.description = description.clone();
    }
    if let Some(priority) = update.priority {
        task.priority = priority;
    }
    if let Some(status) = update.status {
        task.status = status;
    }
    if let Some(due_date) = parse_optional_date("due_date", update.due_date.as_deref())? {
        task.due_date = Some(due_date);
    }
    task.completed_at = reconcile_completion(task.status, task.completed_at, task.created_at);

    write_task(&tx, &task)?;
    tx.commit()?;
    Ok(task)
}

/// Mark a task completed. An already-completed task keeps its original timestamp.
pub fn complete_task(conn: &mut Connection, id: i64) -> RecordResult<Task> {
    let update = TaskUpdate {
        status: Some(TaskStatus::Completed),
        ..Default::default()
    };
    update_task(conn, id, &update)
}

pub fn delete_task(conn: &mut Connection, id: i64) -> RecordResult<()> {
    let tx = conn.transaction()?;
    let rows = tx.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(RecordError::NotFound { kind: "task", id });
    }
    tx.commit()?;
    Ok(())
}

fn write_task(tx: &Transaction<'_>, task: &Task) -> RecordResult<()> {
    tx.execute(
        "UPDATE tasks SET title = ?1, description = ?2, priority = ?3, status = ?4, \
         due_date = ?5, completed_at = ?6 WHERE id = ?7",
        params![
            task.title,
            task.description,
            task.priority,
            task.status,
            task.due_date.as_ref().map(sql_date),
            task.completed_at.as_ref().map(sql_timestamp),
            task.id,
        ],
    )?;
    Ok(())
}
