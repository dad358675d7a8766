//! AssistantBridge trait definition
//!
//! Follows the same pattern as `GraphStore`: async trait + Send + Sync for
//! `Arc<dyn AssistantBridge>` usage.

use super::types::{AssistantHealth, ChatMessage};
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface to a hosted language model.
///
/// # Implementations
///
/// - [`OllamaBridge`](super::OllamaBridge): HTTP client for an Ollama-compatible `/api/chat`
/// - [`MockAssistant`](super::MockAssistant): canned replies for tests
#[async_trait]
pub trait AssistantBridge: Send + Sync {
    /// Complete a conversation.
    ///
    /// `messages` holds the prior turns followed by the new user turn; the
    /// system prompt is sent first.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and unparseable replies.
    async fn complete(&self, system_prompt: &str, messages: &[ChatMessage]) -> Result<String>;

    /// Report backend reachability and the models it serves
    async fn health(&self) -> Result<AssistantHealth>;

    /// Backend host, for status reporting
    fn host(&self) -> &str;

    /// Model used for completions
    fn model_name(&self) -> &str;
}
