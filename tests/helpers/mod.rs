#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use rusqlite::Connection;
use serde_json::Value;
use tower::ServiceExt;

use mentor_hub::config::GeneratorConfig;
use mentor_hub::db;
use mentor_hub::generator::responder::MentorResponder;
use mentor_hub::generator::{GenerateError, TextGenerator};
use mentor_hub::web::{build_router, AppState};

/// Generator double: answers every call the same way and counts calls.
pub struct FakeGenerator {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn down() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(GenerateError::Connection("connection refused".into())),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, GenerateError> {
        match &self.reply {
            Some(_) => Ok(vec!["llama3.2:latest".into()]),
            None => Err(GenerateError::Connection("connection refused".into())),
        }
    }
}

/// Router over a fresh seeded in-memory database.
pub fn test_app(generator: Arc<dyn TextGenerator>) -> Router {
    test_app_with(generator, &GeneratorConfig::default())
}

pub fn test_app_with(generator: Arc<dyn TextGenerator>, config: &GeneratorConfig) -> Router {
    app_over(db::open_in_memory().unwrap(), generator, config)
}

/// Router over a caller-prepared connection.
pub fn app_over(conn: Connection, generator: Arc<dyn TextGenerator>, config: &GeneratorConfig) -> Router {
    let responder = MentorResponder::new(generator, config);
    build_router(AppState::new(conn, responder).unwrap())
}

/// Send one request and decode the JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, body.map(|v| v.to_string())).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Send one request with an arbitrary body and return the raw response bytes.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header("content-type", "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}
