mod helpers;

use axum::http::StatusCode;
use rusqlite::Connection;
use serde_json::json;

use mentor_hub::config::GeneratorConfig;
use mentor_hub::db;

use helpers::{app_over, send, FakeGenerator};

/// Seeded database whose writes to `table` abort inside SQLite.
fn db_rejecting_inserts_into(table: &str) -> Connection {
    let conn = db::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TRIGGER reject_{table} BEFORE INSERT ON {table} \
         BEGIN SELECT RAISE(ABORT, 'disk on fire'); END;"
    ))
    .unwrap();
    conn
}

#[tokio::test]
async fn failed_note_insert_is_500_and_rolled_back() {
    let conn = db_rejecting_inserts_into("notes");
    let app = app_over(conn, FakeGenerator::answering("ok"), &GeneratorConfig::default());

    let (status, body) = send(&app, "POST", "/api/notes", Some(json!({"title": "lost"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "failed to add note"}));

    let (status, body) = send(&app, "GET", "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn failed_chat_save_is_500_and_hides_sqlite_detail() {
    let conn = db_rejecting_inserts_into("chat_messages");
    let generator = FakeGenerator::answering("Keep going.");
    let app = app_over(conn, generator.clone(), &GeneratorConfig::default());

    let (status, body) = send(
        &app,
        "POST",
        "/api/chat",
        Some(json!({"mentor_id": 1, "message": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "failed to save chat message");
    assert!(!body.to_string().contains("disk on fire"));
    assert_eq!(generator.calls(), 1);

    let (_, body) = send(&app, "GET", "/api/mentors/1/messages", None).await;
    assert_eq!(body["messages"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn health_is_unhealthy_without_a_usable_database() {
    let bare = Connection::open_in_memory().unwrap();
    let app = app_over(bare, FakeGenerator::answering("ok"), &GeneratorConfig::default());

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"], "error");
    assert_eq!(body["ollama"], "healthy");
    assert!(body["error"].as_str().unwrap().starts_with("database:"));
}
