use axum::extract::State;
use serde::Serialize;

use crate::records::events;
use crate::records::types::{Event, NewEvent};
use crate::web::error::ApiError;
use crate::web::extract::ApiJson;
use crate::web::response::ApiResponse;
use crate::web::state::AppState;

#[derive(Serialize)]
pub struct EventList {
    events: Vec<Event>,
}

#[derive(Serialize)]
pub struct EventCreated {
    event_id: i64,
}

/// GET /api/events
pub async fn list_events(State(state): State<AppState>) -> Result<ApiResponse<EventList>, ApiError> {
    let events = state
        .with_db(|conn| events::list_events(conn))
        .await
        .map_err(|e| e.or_internal("failed to load events"))?;

    Ok(ApiResponse::ok(EventList { events }))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewEvent>,
) -> Result<ApiResponse<EventCreated>, ApiError> {
    let event_id = state
        .with_db(move |conn| events::create_event(conn, &body))
        .await
        .map_err(|e| e.or_internal("failed to add event"))?;

    tracing::info!(event_id, "event added");
    Ok(ApiResponse::ok(EventCreated { event_id }))
}
