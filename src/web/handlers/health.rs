use axum::extract::State;
use serde::Serialize;

use crate::db;
use crate::web::response::ApiResponse;
use crate::web::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Database and generation service both reachable.
    Healthy,
    /// Database fine, generation service down. Chat still answers with fallbacks.
    Degraded,
    /// Database unreachable.
    Unhealthy,
}

#[derive(Serialize)]
pub struct HealthReport {
    status: HealthStatus,
    database: String,
    ollama: String,
    available_models: Vec<String>,
    current_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// GET /api/health
///
/// Always answers 200; the check outcome lives in `status`.
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthReport> {
    let mut errors = Vec::new();

    let database_ok = match state.with_db(|conn| Ok(db::ping(conn)?)).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unreachable");
            errors.push(format!("database: {e}"));
            false
        }
    };

    let (ollama_ok, available_models) = match state.responder.generator().list_models().await {
        Ok(models) => (true, models),
        Err(e) => {
            tracing::warn!(error = %e, "health check: generation service unreachable");
            errors.push(format!("ollama: {e}"));
            (false, Vec::new())
        }
    };

    let status = match (database_ok, ollama_ok) {
        (false, _) => HealthStatus::Unhealthy,
        (true, false) => HealthStatus::Degraded,
        (true, true) => HealthStatus::Healthy,
    };

    let label = |ok: bool| {
        let text = if ok { "healthy" } else { "error" };
        text.to_string()
    };

    ApiResponse::ok(HealthReport {
        status,
        database: label(database_ok),
        ollama: label(ollama_ok),
        available_models,
        current_model: state.responder.model().to_string(),
        error: (!errors.is_empty()).then(|| errors.join("; ")),
    })
}
