//! Per-client conversation history.
//!
//! A bounded ring of the most recent exchanges (user turn plus assistant
//! reply) per client key. Eviction drops whole exchanges, so a replayed
//! conversation always opens with a user turn. Appends from concurrent
//! requests on the same key are not ordered: last write wins.

use super::types::ChatMessage;
use dashmap::DashMap;
use std::collections::VecDeque;

/// Exchanges kept per client when none is configured
pub const DEFAULT_HISTORY_EXCHANGES: usize = 5;

/// One question and the reply it got
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: ChatMessage,
    pub assistant: ChatMessage,
}

/// Injectable session store keyed by client identity
#[derive(Debug)]
pub struct SessionStore {
    max_exchanges: usize,
    sessions: DashMap<String, VecDeque<Exchange>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_EXCHANGES)
    }
}

impl SessionStore {
    /// Store keeping at most `max_exchanges` exchanges per client (0 disables history)
    pub fn new(max_exchanges: usize) -> Self {
        Self {
            max_exchanges,
            sessions: DashMap::new(),
        }
    }

    /// Snapshot of a client's history as alternating messages, oldest first
    pub fn history(&self, client: &str) -> Vec<ChatMessage> {
        self.sessions
            .get(client)
            .map(|h| {
                h.iter()
                    .flat_map(|e| [e.user.clone(), e.assistant.clone()])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Record an exchange, evicting the oldest beyond the cap
    pub fn record(&self, client: &str, user: ChatMessage, assistant: ChatMessage) {
        if self.max_exchanges == 0 {
            return;
        }
        let mut entry = self.sessions.entry(client.to_string()).or_default();
        while entry.len() >= self.max_exchanges {
            entry.pop_front();
        }
        entry.push_back(Exchange { user, assistant });
    }

    /// Forget a client's history
    pub fn clear(&self, client: &str) {
        self.sessions.remove(client);
    }

    /// Number of clients with history
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
