use axum::extract::State;
use serde::Serialize;

use crate::records::notes;
use crate::records::types::{NewNote, Note, NoteUpdate};
use crate::web::error::ApiError;
use crate::web::extract::{ApiJson, RecordId};
use crate::web::response::{ApiResponse, Empty};
use crate::web::state::AppState;

#[derive(Serialize)]
pub struct NoteList {
    notes: Vec<Note>,
}

#[derive(Serialize)]
pub struct NoteCreated {
    note_id: i64,
}

/// GET /api/notes
pub async fn list_notes(State(state): State<AppState>) -> Result<ApiResponse<NoteList>, ApiError> {
    let notes = state
        .with_db(|conn| notes::list_notes(conn))
        .await
        .map_err(|e| e.or_internal("failed to load notes"))?;

    Ok(ApiResponse::ok(NoteList { notes }))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewNote>,
) -> Result<ApiResponse<NoteCreated>, ApiError> {
    let note_id = state
        .with_db(move |conn| notes::create_note(conn, &body))
        .await
        .map_err(|e| e.or_internal("failed to add note"))?;

    tracing::info!(note_id, "note added");
    Ok(ApiResponse::ok(NoteCreated { note_id }))
}

/// PUT /api/notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ApiJson(body): ApiJson<NoteUpdate>,
) -> Result<ApiResponse<Empty>, ApiError> {
    state
        .with_db(move |conn| notes::update_note(conn, id, &body))
        .await
        .map_err(|e| e.or_internal("failed to update note"))?;

    tracing::info!(note_id = id, "note updated");
    Ok(ApiResponse::done())
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<ApiResponse<Empty>, ApiError> {
    state
        .with_db(move |conn| notes::delete_note(conn, id))
        .await
        .map_err(|e| e.or_internal("failed to delete note"))?;

    tracing::info!(note_id = id, "note deleted");
    Ok(ApiResponse::done())
}
