mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{send, send_raw, test_app, FakeGenerator};

#[tokio::test]
async fn task_lifecycle_over_http() {
    let app = test_app(FakeGenerator::answering("ok"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({"title": "Write report", "priority": "high", "due_date": "2025-03-01T09:30"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["task_id"].as_i64().unwrap();

    let (_, body) = send(&app, "GET", "/api/tasks", None).await;
    let task = &body["tasks"][0];
    assert_eq!(task["id"], id);
    assert_eq!(task["status"], "pending");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["due_date"], "2025-03-01T09:30:00");
    assert_eq!(task["is_completed"], false);
    assert!(task["completed_at"].is_null());

    let (status, _) = send(&app, "PUT", &format!("/api/tasks/{id}/complete"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/api/tasks", None).await;
    let task = &body["tasks"][0];
    assert_eq!(task["status"], "completed");
    assert_eq!(task["is_completed"], true);
    let stamp = |field: &str| {
        chrono::DateTime::parse_from_rfc3339(task[field].as_str().unwrap()).unwrap()
    };
    assert!(stamp("completed_at") >= stamp("created_at"));

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(json!({"status": "in-progress"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(body["tasks"][0]["status"], "in-progress");
    assert!(body["tasks"][0]["completed_at"].is_null());
    assert_eq!(body["tasks"][0]["title"], "Write report");

    let (status, body) = send(&app, "DELETE", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let (_, body) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(body["tasks"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn tasks_list_newest_first() {
    let app = test_app(FakeGenerator::answering("ok"));
    for title in ["first", "second", "third"] {
        send(&app, "POST", "/api/tasks", Some(json!({"title": title}))).await;
    }

    let (_, body) = send(&app, "GET", "/api/tasks", None).await;
    let titles: Vec<&str> = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn completing_twice_keeps_first_timestamp() {
    let app = test_app(FakeGenerator::answering("ok"));
    let (_, body) = send(&app, "POST", "/api/tasks", Some(json!({"title": "once"}))).await;
    let id = body["task_id"].as_i64().unwrap();

    send(&app, "PUT", &format!("/api/tasks/{id}/complete"), None).await;
    let (_, first) = send(&app, "GET", "/api/tasks", None).await;
    send(&app, "PUT", &format!("/api/tasks/{id}/complete"), None).await;
    let (_, second) = send(&app, "GET", "/api/tasks", None).await;

    assert_eq!(first["tasks"][0]["completed_at"], second["tasks"][0]["completed_at"]);
}

#[tokio::test]
async fn create_task_without_title_is_rejected() {
    let app = test_app(FakeGenerator::answering("ok"));

    let (status, body) = send(&app, "POST", "/api/tasks", Some(json!({"title": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("title"));

    let (_, body) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(body["tasks"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_task_with_unknown_priority_is_rejected() {
    let app = test_app(FakeGenerator::answering("ok"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({"title": "x", "priority": "urgent"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_task_for_unknown_mentor_is_rejected() {
    let app = test_app(FakeGenerator::answering("ok"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({"title": "x", "mentor_id": 99})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "mentor not found: 99");
}

#[tokio::test]
async fn malformed_json_uses_error_envelope() {
    let app = test_app(FakeGenerator::answering("ok"));

    let (status, bytes) = send_raw(&app, "POST", "/api/tasks", Some("{not json".into())).await;
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
}

#[tokio::test]
async fn missing_task_is_not_found() {
    let app = test_app(FakeGenerator::answering("ok"));

    let (status, body) = send(&app, "DELETE", "/api/tasks/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "PUT", "/api/tasks/404", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/api/tasks/404/complete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_a_validation_error() {
    let app = test_app(FakeGenerator::answering("ok"));

    let (status, body) = send(&app, "DELETE", "/api/tasks/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
