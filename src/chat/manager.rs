//! ChatManager: turns a chat request into a reply.
//!
//! Builds the conversation from the client's history, forwards it to the
//! assistant bridge and records the exchange. A bridge failure becomes an
//! apology reply; the chat path never fails the request.

use super::history::SessionStore;
use super::prompt::{user_turn, SYSTEM_PROMPT};
use super::traits::AssistantBridge;
use super::types::{ChatMessage, ChatRequest};
use std::sync::Arc;
use tracing::{debug, warn};

/// Client key used when a request identifies no one
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// Chat orchestration over an injected bridge and session store
#[derive(Clone)]
pub struct ChatManager {
    bridge: Arc<dyn AssistantBridge>,
    sessions: Arc<SessionStore>,
}

impl ChatManager {
    pub fn new(bridge: Arc<dyn AssistantBridge>, sessions: Arc<SessionStore>) -> Self {
        Self { bridge, sessions }
    }

    pub fn bridge(&self) -> &Arc<dyn AssistantBridge> {
        &self.bridge
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Answer `request` on behalf of `client`.
    ///
    /// Only successful exchanges are appended to the history.
    pub async fn respond(&self, client: &str, request: &ChatRequest) -> String {
        let turn = ChatMessage::user(user_turn(&request.message, request.context.as_deref()));

        let mut messages = self.sessions.history(client);
        messages.push(turn.clone());
        debug!(
            "Chat for {}: {} message(s) sent to {}",
            client,
            messages.len(),
            self.bridge.model_name()
        );

        match self.bridge.complete(SYSTEM_PROMPT, &messages).await {
            Ok(reply) => {
                self.sessions
                    .record(client, turn, ChatMessage::assistant(reply.clone()));
                reply
            }
            Err(e) => {
                warn!("Assistant unavailable for {}: {:#}", client, e);
                format!(
                    "⚠️ Assistant unavailable: {:#}. Check that the language model is running at {}",
                    e,
                    self.bridge.host()
                )
            }
        }
    }
}
