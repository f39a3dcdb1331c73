//! Server-rendered pages. Templates and static assets are compiled into the
//! binary; the pages only carry initial data and the script does the rest
//! through the JSON API.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::records::types::{ChatMessage, Mentor};
use crate::records::{chat, mentors, RecordError};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("chat.html", include_str!("../../templates/chat.html")),
    ("tasks.html", include_str!("../../templates/tasks.html")),
    ("calendar.html", include_str!("../../templates/calendar.html")),
    ("notes.html", include_str!("../../templates/notes.html")),
    ("error.html", include_str!("../../templates/error.html")),
];

const APP_JS: &str = include_str!("../../static/app.js");
const STYLE_CSS: &str = include_str!("../../static/style.css");

/// Compiled template set.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> anyhow::Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, PageError> {
        let template = self.env.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }

    fn error_page(&self, status: StatusCode, message: &str) -> Response {
        let body = self
            .env
            .get_template("error.html")
            .and_then(|t| t.render(context! { status => status.as_u16(), message }));
        match body {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "failed to render error page");
                (status, message.to_string()).into_response()
            }
        }
    }
}

/// Failure while building a page. Rendered as an HTML status page by the
/// handler, since pages never answer with the JSON envelope.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("{0}")]
    NotFound(String),
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("{0}")]
    Internal(String),
}

impl From<super::error::ApiError> for PageError {
    fn from(e: super::error::ApiError) -> Self {
        match e {
            super::error::ApiError::NotFound(msg) => Self::NotFound(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<RecordError> for PageError {
    fn from(e: RecordError) -> Self {
        super::error::ApiError::from(e).into()
    }
}

fn page_result(state: &AppState, result: Result<Html<String>, PageError>) -> Response {
    match result {
        Ok(html) => html.into_response(),
        Err(PageError::NotFound(msg)) => state.views.error_page(StatusCode::NOT_FOUND, &msg),
        Err(e) => {
            tracing::error!(error = %e, "page render failed");
            state
                .views
                .error_page(StatusCode::INTERNAL_SERVER_ERROR, "something went wrong")
        }
    }
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Response {
    let result = async {
        let mentors = state.with_db(|conn| mentors::list_mentors(conn)).await?;
        state.views.render("index.html", context! { page => "home", mentors })
    }
    .await;
    page_result(&state, result)
}

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    mentor_id: Option<i64>,
}

/// GET /chat?mentor_id=N
pub async fn chat_page(
    State(state): State<AppState>,
    query: Result<Query<ChatQuery>, QueryRejection>,
) -> Response {
    let mentor_id = match query {
        Ok(Query(query)) => query.mentor_id.unwrap_or(1),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "bad chat page query");
            return state
                .views
                .error_page(StatusCode::BAD_REQUEST, "mentor_id must be a number");
        }
    };
    let result = async {
        let (mentor, messages): (Mentor, Vec<ChatMessage>) = state
            .with_db(move |conn| {
                let mentor = mentors::get_mentor(conn, mentor_id)?;
                let messages = chat::history(conn, mentor_id)?;
                Ok((mentor, messages))
            })
            .await?;
        state
            .views
            .render("chat.html", context! { page => "chat", mentor, messages })
    }
    .await;
    page_result(&state, result)
}

/// GET /tasks
pub async fn tasks_page(State(state): State<AppState>) -> Response {
    let result = async {
        let mentors = state.with_db(|conn| mentors::list_mentors(conn)).await?;
        state.views.render("tasks.html", context! { page => "tasks", mentors })
    }
    .await;
    page_result(&state, result)
}

/// GET /calendar
pub async fn calendar_page(State(state): State<AppState>) -> Response {
    let result = state.views.render("calendar.html", context! { page => "calendar" });
    page_result(&state, result)
}

/// GET /notes
pub async fn notes_page(State(state): State<AppState>) -> Response {
    let result = state.views.render("notes.html", context! { page => "notes" });
    page_result(&state, result)
}

/// GET /static/app.js
pub async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], APP_JS)
}

/// GET /static/style.css
pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}
