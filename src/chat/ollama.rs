//! Ollama assistant bridge
//!
//! Implements `AssistantBridge` against an Ollama-compatible server:
//! - `POST {host}/api/chat` with `stream: false` for completions
//! - `GET {host}/api/tags` to list the installed models

use super::traits::AssistantBridge;
use super::types::{AssistantHealth, ChatMessage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP bridge to an Ollama server.
///
/// Cheaply cloneable (shares the reqwest client internally).
#[derive(Clone)]
pub struct OllamaBridge {
    client: reqwest::Client,
    host: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaBridge {
    /// Create a bridge for `host` (e.g. `http://localhost:11434`) and `model`
    pub fn new(host: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    /// Turn a non-success response into an error carrying the server's message
    async fn fail(response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => anyhow::anyhow!("Ollama error ({}): {}", status.as_u16(), err.error),
            Err(_) => anyhow::anyhow!("Ollama returned {}: {}", status.as_u16(), body),
        }
    }
}

#[async_trait]
impl AssistantBridge for OllamaBridge {
    async fn complete(&self, system_prompt: &str, messages: &[ChatMessage]) -> Result<String> {
        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(ChatMessage::system(system_prompt));
        all.extend_from_slice(messages);

        let url = self.endpoint("/api/chat");
        let response = self
            .client
            .post(&url)
            .json(&ChatCompletionRequest {
                model: &self.model,
                messages: all,
                stream: false,
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach language model at {}", self.host))?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;
        Ok(body.message.content)
    }

    async fn health(&self) -> Result<AssistantHealth> {
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .with_context(|| format!("Failed to reach language model at {}", self.host))?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        let tags: TagsResponse = response
            .json()
            .await
            .context("Failed to parse model list")?;

        Ok(AssistantHealth {
            host: self.host.clone(),
            current_model: self.model.clone(),
            available_models: tags.models.into_iter().map(|m| m.name).collect(),
        })
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
