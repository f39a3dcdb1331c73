use axum::extract::State;
use serde::Serialize;

use crate::records::types::{ChatMessage, Mentor};
use crate::records::{chat, mentors};
use crate::web::error::ApiError;
use crate::web::extract::RecordId;
use crate::web::response::ApiResponse;
use crate::web::state::AppState;

#[derive(Serialize)]
pub struct MentorList {
    mentors: Vec<Mentor>,
}

#[derive(Serialize)]
pub struct MessageHistory {
    mentor: Mentor,
    messages: Vec<ChatMessage>,
}

/// GET /api/mentors
pub async fn list_mentors(
    State(state): State<AppState>,
) -> Result<ApiResponse<MentorList>, ApiError> {
    let mentors = state
        .with_db(|conn| mentors::list_mentors(conn))
        .await
        .map_err(|e| e.or_internal("failed to load mentors"))?;

    Ok(ApiResponse::ok(MentorList { mentors }))
}

/// GET /api/mentors/{id}/messages
pub async fn message_history(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<ApiResponse<MessageHistory>, ApiError> {
    let (mentor, messages) = state
        .with_db(move |conn| {
            let mentor = mentors::get_mentor(conn, id)?;
            let messages = chat::history(conn, id)?;
            Ok((mentor, messages))
        })
        .await
        .map_err(|e| e.or_internal("failed to load chat history"))?;

    Ok(ApiResponse::ok(MessageHistory { mentor, messages }))
}
