use std::sync::{Arc, Mutex};

use anyhow::Result;
use rusqlite::Connection;

use super::error::ApiError;
use super::pages::Views;
use crate::generator::responder::MentorResponder;
use crate::records::RecordResult;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    pub responder: Arc<MentorResponder>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(conn: Connection, responder: MentorResponder) -> Result<Self> {
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
            responder: Arc::new(responder),
            views: Arc::new(Views::new()?),
        })
    }

    /// Run a persistence call on the blocking pool while holding the connection.
    pub async fn with_db<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> RecordResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut conn = db.lock().map_err(|e| {
                tracing::error!(error = %e, "db lock poisoned");
                ApiError::Internal("database unavailable".into())
            })?;
            f(&mut conn).map_err(ApiError::from)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "db task failed");
            ApiError::Internal("database task failed".into())
        })?
    }
}
