//! Task CRUD handlers.

use axum::extract::State;
use serde::Serialize;

use crate::records::tasks;
use crate::records::types::{NewTask, Task, TaskUpdate};
use crate::web::error::ApiError;
use crate::web::extract::{ApiJson, RecordId};
use crate::web::response::{ApiResponse, Empty};
use crate::web::state::AppState;

/// A task plus the derived `is_completed` flag the pages key off.
#[derive(Serialize)]
pub struct TaskJson {
    #[serde(flatten)]
    task: Task,
    is_completed: bool,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            is_completed: task.is_completed(),
            task,
        }
    }
}

#[derive(Serialize)]
pub struct TaskList {
    tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct TaskCreated {
    task_id: i64,
}

/// GET /api/tasks
pub async fn list_tasks(State(state): State<AppState>) -> Result<ApiResponse<TaskList>, ApiError> {
    let tasks = state
        .with_db(|conn| tasks::list_tasks(conn))
        .await
        .map_err(|e| e.or_internal("failed to load tasks"))?;

    Ok(ApiResponse::ok(TaskList {
        tasks: tasks.into_iter().map(TaskJson::from).collect(),
    }))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewTask>,
) -> Result<ApiResponse<TaskCreated>, ApiError> {
    let task_id = state
        .with_db(move |conn| tasks::create_task(conn, &body))
        .await
        .map_err(|e| e.or_internal("failed to add task"))?;

    tracing::info!(task_id, "task added");
    Ok(ApiResponse::ok(TaskCreated { task_id }))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ApiJson(body): ApiJson<TaskUpdate>,
) -> Result<ApiResponse<Empty>, ApiError> {
    let task = state
        .with_db(move |conn| tasks::update_task(conn, id, &body))
        .await
        .map_err(|e| e.or_internal("failed to update task"))?;

    tracing::info!(task_id = id, status = %task.status, "task updated");
    Ok(ApiResponse::done())
}

/// PUT /api/tasks/{id}/complete
pub async fn complete_task(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<ApiResponse<Empty>, ApiError> {
    state
        .with_db(move |conn| tasks::complete_task(conn, id))
        .await
        .map_err(|e| e.or_internal("failed to update task"))?;

    tracing::info!(task_id = id, "task completed");
    Ok(ApiResponse::done())
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<ApiResponse<Empty>, ApiError> {
    state
        .with_db(move |conn| tasks::delete_task(conn, id))
        .await
        .map_err(|e| e.or_internal("failed to delete task"))?;

    tracing::info!(task_id = id, "task deleted");
    Ok(ApiResponse::done())
}
