//! Chat types: messages exchanged with the language model and the HTTP payloads

use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message of a conversation, in the shape LLM chat APIs expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Summary of the subgraph the user has selected
    #[serde(default)]
    pub context: Option<String>,
    /// Conversation key; falls back to the `x-client-id` header
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Backend status reported by `GET /health/llm`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantHealth {
    pub host: String,
    pub current_model: String,
    pub available_models: Vec<String>,
}

impl AssistantHealth {
    pub fn model_exists(&self) -> bool {
        self.available_models.iter().any(|m| m == &self.current_model)
    }
}
