//! Mentor Hub: chat with four mentor personas backed by a local Ollama model,
//! alongside plain task, note and calendar records.
//!
//! Chat is stateless per request. Each message is answered from a persona
//! prompt and the message alone; the exchange is then appended to the log.
//! When the model service is slow or down the mentor still answers, with a
//! canned line in their voice.
//!
//! # Modules
//!
//! - [`config`]: TOML config plus `MENTOR_*` environment overrides
//! - [`db`]: SQLite connection setup, schema, and health checks
//! - [`records`]: mentors, chat log, tasks, notes, events
//! - [`generator`]: persona prompts, the Ollama client, and the retrying responder
//! - [`web`]: axum router, JSON API handlers, and server-rendered pages

pub mod config;
pub mod db;
pub mod generator;
pub mod records;
pub mod web;
