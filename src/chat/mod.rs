//! Chat module: graph assistant backed by a hosted language model
//!
//! Architecture follows the project pattern (trait + impl + mock):
//! - `AssistantBridge` trait: async interface to the language model
//! - `OllamaBridge`: real implementation over the Ollama HTTP API
//! - `MockAssistant`: deterministic mock for tests
//! - `SessionStore`: bounded per-client conversation history
//! - `ChatManager`: builds the conversation and degrades gracefully on failure

pub mod history;
pub mod manager;
pub mod mock;
pub mod ollama;
pub mod prompt;
pub mod traits;
pub mod types;

pub use history::SessionStore;
pub use manager::ChatManager;
pub use mock::MockAssistant;
pub use ollama::OllamaBridge;
pub use traits::AssistantBridge;
pub use types::{AssistantHealth, ChatMessage, ChatReply, ChatRequest, ChatRole};
