//! HTTP client for an Ollama-compatible service (`/api/generate`, `/api/tags`).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{GenerateError, TextGenerator};
use crate::config::{GeneratorConfig, SamplingOptions};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a SamplingOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: Option<String>,
}

pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    options: SamplingOptions,
    timeout: Duration,
    health_timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &GeneratorConfig) -> Self {
        tracing::info!(
            base_url = %config.base_url,
            model = %config.model,
            "generation client initialized"
        );
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            options: config.options.clone(),
            timeout: config.timeout(),
            health_timeout: config.health_timeout(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn classify(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        GenerateError::Timeout
    } else if err.is_connect() {
        GenerateError::Connection(err.to_string())
    } else if err.is_decode() {
        GenerateError::MalformedBody(err.to_string())
    } else {
        GenerateError::Transport(err.to_string())
    }
}

async fn error_status(resp: reqwest::Response) -> GenerateError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    GenerateError::Status { status, body }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerateError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: &self.options,
        };

        let resp = self
            .client
            .post(self.url("/api/generate"))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(error_status(resp).await);
        }

        let data: GenerateResponse = resp.json().await.map_err(classify)?;
        data.response
            .map(|text| text.trim().to_string())
            .ok_or_else(|| GenerateError::MalformedBody("missing `response` field".into()))
    }

    async fn list_models(&self) -> Result<Vec<String>, GenerateError> {
        let resp = self
            .client
            .get(self.url("/api/tags"))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(classify)?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(error_status(resp).await);
        }

        let data: TagsResponse = resp.json().await.map_err(classify)?;
        Ok(data
            .models
            .into_iter()
            .map(|m| m.name.unwrap_or_else(|| "unknown".into()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_wire_format() {
        let options = SamplingOptions::default();
        let body = GenerateRequest {
            model: "llama3.2:latest",
            prompt: "hello",
            stream: false,
            options: &options,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3.2:latest");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 200);
        assert_eq!(json["options"]["num_ctx"], 1024);
    }

    #[test]
    fn tags_tolerate_missing_names() {
        let data: TagsResponse =
            serde_json::from_str(r#"{"models":[{"name":"llama3.2:latest"},{}]}"#).unwrap();
        assert_eq!(data.models.len(), 2);
        assert!(data.models[1].name.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let config = GeneratorConfig {
            base_url: "http://localhost:11434/".into(),
            ..Default::default()
        };
        let client = OllamaClient::new(&config);
        assert_eq!(client.url("/api/tags"), "http://localhost:11434/api/tags");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_connection_error() {
        // Port 9 (discard) is closed on test hosts, so the connect is refused.
        let config = GeneratorConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = OllamaClient::new(&config);
        let err = client.generate("llama3.2:latest", "hi").await.unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Connection(_) | GenerateError::Timeout | GenerateError::Transport(_)
        ));
    }
}
