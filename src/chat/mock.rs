//! Mock assistant for tests
//!
//! Replies deterministically and records what it was sent, so tests can
//! assert on the conversation that reached the backend.

use super::traits::AssistantBridge;
use super::types::{AssistantHealth, ChatMessage};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Deterministic assistant that echoes the last user turn.
///
/// # Example
///
/// ```rust
/// use protograph::chat::{AssistantBridge, ChatMessage, MockAssistant};
///
/// # tokio_test::block_on(async {
/// let assistant = MockAssistant::new();
/// let reply = assistant
///     .complete("system", &[ChatMessage::user("hello")])
///     .await
///     .unwrap();
/// assert_eq!(reply, "echo: hello");
///
/// let failing = MockAssistant::failing("connection refused");
/// assert!(failing.complete("system", &[]).await.is_err());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MockAssistant {
    failure: Option<String>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assistant whose every call fails with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Conversations received so far (system prompt excluded)
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AssistantBridge for MockAssistant {
    async fn complete(&self, _system_prompt: &str, messages: &[ChatMessage]) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }
        if let Some(reason) = &self.failure {
            anyhow::bail!("{}", reason);
        }
        let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        Ok(format!("echo: {}", last))
    }

    async fn health(&self) -> Result<AssistantHealth> {
        if let Some(reason) = &self.failure {
            anyhow::bail!("{}", reason);
        }
        Ok(AssistantHealth {
            host: self.host().to_string(),
            current_model: self.model_name().to_string(),
            available_models: vec![self.model_name().to_string()],
        })
    }

    fn host(&self) -> &str {
        "mock://assistant"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
