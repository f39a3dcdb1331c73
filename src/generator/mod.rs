//! Mentor reply generation against a local text-generation service.
//!
//! [`TextGenerator`] is the seam to the outside world; [`ollama::OllamaClient`]
//! implements it over HTTP. [`responder::MentorResponder`] layers persona prompts,
//! retries, backup models, and canned fallbacks on top, and never fails.

pub mod ollama;
pub mod personas;
pub mod responder;

use async_trait::async_trait;

/// Why a single generation call did not produce text.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("could not connect to generation service: {0}")]
    Connection(String),
    #[error("generation request timed out")]
    Timeout,
    #[error("generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// A text-generation backend. Implementations are one-shot: retries and
/// fallbacks belong to the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt` with the named model.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerateError>;

    /// Names of the models the service currently has available.
    async fn list_models(&self) -> Result<Vec<String>, GenerateError>;
}
