//! Route-boundary error type. Every failure leaves as `{"success": false, "error": ...}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::records::RecordError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),
    /// Unknown record id.
    #[error("{0}")]
    NotFound(String),
    /// Persistence or runtime failure. The message is what the client sees;
    /// the underlying cause has already been logged.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Replace the client-facing text of an internal error, leaving
    /// validation and not-found messages untouched.
    pub fn or_internal(self, message: &str) -> Self {
        match self {
            Self::Internal(_) => Self::Internal(message.to_string()),
            other => other,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::NotFound { .. } => Self::NotFound(e.to_string()),
            RecordError::Validation(msg) => Self::Validation(msg),
            RecordError::Database(err) => {
                tracing::error!(error = %err, "database operation failed, transaction rolled back");
                Self::Internal("internal database error".into())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(format!("invalid path: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_errors_map_to_taxonomy() {
        let not_found: ApiError = RecordError::NotFound { kind: "task", id: 3 }.into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "task not found: 3");

        let invalid: ApiError = RecordError::Validation("title must not be empty".into()).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let db: ApiError = RecordError::Database(rusqlite::Error::InvalidQuery).into();
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.to_string(), "internal database error");
    }

    #[test]
    fn or_internal_only_rewrites_internal_errors() {
        let e = ApiError::Internal("x".into()).or_internal("failed to add task");
        assert_eq!(e.to_string(), "failed to add task");

        let e = ApiError::NotFound("note not found: 1".into()).or_internal("failed");
        assert_eq!(e.to_string(), "note not found: 1");
    }
}
