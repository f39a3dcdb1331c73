//! HTTP surface: server-rendered pages plus the JSON API under `/api`.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod pages;
pub mod response;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use self::error::ApiError;
use self::handlers::{chat, events, health, mentors, notes, tasks};
pub use self::state::AppState;

/// Routes nested under `/api`.
fn api_router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/{id}", put(tasks::update_task).delete(tasks::delete_task))
        .route("/tasks/{id}/complete", put(tasks::complete_task))
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route("/notes/{id}", put(notes::update_note).delete(notes::delete_note))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/chat", post(chat::send_message))
        .route("/mentors", get(mentors::list_mentors))
        .route("/mentors/{id}/messages", get(mentors::message_history))
        .route("/health", get(health::health))
        .fallback(api_not_found)
}

/// The full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/chat", get(pages::chat_page))
        .route("/tasks", get(pages::tasks_page))
        .route("/calendar", get(pages::calendar_page))
        .route("/notes", get(pages::notes_page))
        .route("/static/app.js", get(pages::script))
        .route("/static/style.css", get(pages::stylesheet))
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("no such endpoint".into())
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "mentor hub listening at http://{addr}/");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down web server");
        })
        .await?;

    Ok(())
}
