//! Chat API handlers

use crate::chat::manager::ANONYMOUS_CLIENT;
use crate::chat::{ChatReply, ChatRequest};
use crate::AppState;
use axum::{extract::State, http::HeaderMap, Json};

/// Header carrying the client identity when the body has no `session_id`
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Resolve the conversation key: body `session_id`, then header, then anonymous
fn client_identity(headers: &HeaderMap, request: &ChatRequest) -> String {
    request
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get(CLIENT_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or(ANONYMOUS_CLIENT)
        .to_string()
}

/// Ask the graph assistant. Always answers 200; backend failures become an apology.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    let client = client_identity(&headers, &request);
    let reply = state.chat.respond(&client, &request).await;
    Json(ChatReply { reply })
}
