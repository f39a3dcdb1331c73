use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::{chat, mentors};
use crate::web::error::ApiError;
use crate::web::extract::ApiJson;
use crate::web::response::ApiResponse;
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub mentor_id: Option<i64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatReply {
    response: String,
    timestamp: DateTime<Utc>,
    message_id: i64,
}

/// POST /api/chat
///
/// Validates the message and mentor before any generation happens, so a bad
/// request never reaches the generation service. Generation itself cannot
/// fail; only persisting the exchange can.
pub async fn send_message(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatRequest>,
) -> Result<ApiResponse<ChatReply>, ApiError> {
    let message = body.message.trim().to_string();
    if message.is_empty() {
        return Err(ApiError::Validation("message must not be empty".into()));
    }
    let mentor_id = body
        .mentor_id
        .ok_or_else(|| ApiError::Validation("mentor_id is required".into()))?;

    let mentor = state
        .with_db(move |conn| mentors::get_mentor(conn, mentor_id))
        .await
        .map_err(|e| e.or_internal("failed to load mentor"))?;

    let reply = state.responder.respond(&mentor.name, &message).await;
    tracing::info!(mentor = %mentor.name, source = ?reply.source, "mentor replied");

    let text = reply.text;
    let saved = state
        .with_db(move |conn| chat::append_message(conn, mentor_id, &message, &text))
        .await
        .map_err(|e| e.or_internal("failed to save chat message"))?;

    Ok(ApiResponse::ok(ChatReply {
        response: saved.mentor_response,
        timestamp: saved.timestamp,
        message_id: saved.id,
    }))
}
