//! Success envelope: `{"success": true, ...payload fields}`.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    /// Flattened into the top-level object, so `T` must serialize as a map.
    #[serde(flatten)]
    pub payload: T,
}

/// Payload for operations that return nothing but the success flag.
#[derive(Debug, Serialize)]
pub struct Empty {}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

impl ApiResponse<Empty> {
    pub fn done() -> Self {
        Self::ok(Empty {})
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
