//! API route definitions

use super::chat_handlers;
use super::handlers;
use crate::{AppState, Config};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// CORS policy from the configured origin list
fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.cors_allows_any() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        // ====================================================================
        // Graph
        // ====================================================================
        .route("/graph", get(handlers::get_graph))
        .route("/neighbors/{node_key}", get(handlers::get_neighbors))
        .route("/stats", get(handlers::get_stats))
        .route("/search", get(handlers::search))
        // ====================================================================
        // Analytics (BI tool)
        // ====================================================================
        .route("/analytics/team-coupling", get(handlers::team_coupling))
        .route(
            "/analytics/team-coupling-table",
            get(handlers::team_coupling_table),
        )
        .route(
            "/analytics/notify-update",
            post(handlers::notify_update),
        )
        // ====================================================================
        // Assistant
        // ====================================================================
        .route("/chat", post(chat_handlers::chat))
        .route("/health/llm", get(handlers::llm_health))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
