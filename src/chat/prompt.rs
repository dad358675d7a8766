//! Prompt construction for the graph assistant

/// System prompt sent ahead of every conversation
pub const SYSTEM_PROMPT: &str = "You are a graph exploration assistant for ProtoGraph, a tool that helps teams \
understand relationships in their operational data. \
Use the provided node context to explain relationships and insights. \
Be concise and actionable in your responses.";

/// Build the user turn, prefixing the selected-subgraph summary when there is one
pub fn user_turn(message: &str, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!("Context: {}\n\nQuestion: {}", context, message),
        None => message.to_string(),
    }
}
