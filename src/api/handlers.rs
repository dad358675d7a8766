//! API request handlers

use crate::graph::{
    CouplingRow, CouplingTable, GraphError, GraphSnapshot, GraphStats, SearchResults, Subgraph,
    TraversalDepth,
};
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ============================================================================
// Service info
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub database: String,
    pub graph_store: String,
    pub connected: bool,
    pub llm_backend: String,
    pub llm_model: String,
}

/// Service identity and backend connectivity
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    let connected = state.graph.is_connected().await;
    let bridge = state.chat.bridge();

    Json(ServiceInfo {
        service: "ProtoGraph API".to_string(),
        status: if connected { "running" } else { "degraded" }.to_string(),
        database: "neo4j".to_string(),
        graph_store: state.config.neo4j_uri.clone(),
        connected,
        llm_backend: bridge.host().to_string(),
        llm_model: bridge.model_name().to_string(),
    })
}

// ============================================================================
// Graph
// ============================================================================

/// Whole graph, normalized
pub async fn get_graph(State(state): State<AppState>) -> Result<Json<GraphSnapshot>, AppError> {
    Ok(Json(state.graph.full_graph().await?))
}

#[derive(Debug, Deserialize)]
pub struct NeighborsQuery {
    pub depth: Option<u32>,
}

/// Bounded neighborhood of a node
pub async fn get_neighbors(
    State(state): State<AppState>,
    Path(node_key): Path<String>,
    query: Result<Query<NeighborsQuery>, QueryRejection>,
) -> Result<Json<Subgraph>, AppError> {
    let Query(query) = query?;
    let depth = match query.depth {
        Some(d) => TraversalDepth::new(d)?,
        None => TraversalDepth::default(),
    };
    debug!("Neighbors of {} at depth {}", node_key, depth.get());
    Ok(Json(state.graph.neighbors(&node_key, depth).await?))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<GraphStats>, AppError> {
    Ok(Json(state.graph.stats().await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Case-insensitive label search
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResults>, AppError> {
    let Query(query) = query?;
    Ok(Json(state.graph.search(&query.q).await?))
}

// ============================================================================
// Analytics
// ============================================================================

/// Team coupling as flat rows for the BI tool
pub async fn team_coupling(
    State(state): State<AppState>,
) -> Result<Json<Vec<CouplingRow>>, AppError> {
    Ok(Json(state.graph.team_coupling(Utc::now()).await?))
}

/// Team coupling with display column names and a refresh timestamp
pub async fn team_coupling_table(
    State(state): State<AppState>,
) -> Result<Json<CouplingTable>, AppError> {
    Ok(Json(state.graph.team_coupling_table(Utc::now()).await?))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotifyAck {
    pub status: String,
    pub received: serde_json::Value,
    pub timestamp: String,
}

/// Acknowledge a graph-change notification from the dashboard
pub async fn notify_update(Json(payload): Json<serde_json::Value>) -> Json<NotifyAck> {
    info!("Graph update notification received: {}", payload);
    Json(NotifyAck {
        status: "ok".to_string(),
        received: payload,
        timestamp: Utc::now().to_rfc3339(),
    })
}

// ============================================================================
// Language model health
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LlmHealthResponse {
    Online {
        host: String,
        current_model: String,
        available_models: Vec<String>,
        model_exists: bool,
    },
    Offline {
        host: String,
        message: String,
    },
}

/// Reachability of the language model and the models it serves
pub async fn llm_health(State(state): State<AppState>) -> Json<LlmHealthResponse> {
    let bridge = state.chat.bridge();
    let response = match bridge.health().await {
        Ok(health) => LlmHealthResponse::Online {
            model_exists: health.model_exists(),
            host: health.host,
            current_model: health.current_model,
            available_models: health.available_models,
        },
        Err(e) => LlmHealthResponse::Offline {
            host: bridge.host().to_string(),
            message: format!("{:#}", e),
        },
    };
    Json(response)
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<GraphError> for AppError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Validation(msg) => AppError::BadRequest(msg),
            GraphError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::Internal(anyhow::anyhow!(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::chat::MockAssistant;
    use crate::neo4j::mock::MockGraphStore;
    use crate::neo4j::models::StoredNode;
    use crate::test_helpers::{mock_app_state, mock_app_state_with, sample_graph_store};
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use std::sync::Arc;
    use tower::ServiceExt; // oneshot

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = create_router(state).oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn offline_state() -> AppState {
        let store = sample_graph_store();
        store.set_offline(true);
        mock_app_state_with(Arc::new(store), Arc::new(MockAssistant::new()))
    }

    #[tokio::test]
    async fn test_root_reports_connectivity() {
        let (status, json) = get_json(mock_app_state(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["service"], "ProtoGraph API");
        assert_eq!(json["connected"], true);
        assert_eq!(json["llm_model"], "mock-model");

        let (status, json) = get_json(offline_state(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["connected"], false);
    }

    #[tokio::test]
    async fn test_graph_endpoint() {
        let (status, json) = get_json(mock_app_state(), "/graph").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["nodes"].as_array().unwrap().len(), 14);
        assert_eq!(json["edges"].as_array().unwrap().len(), 10);
        assert_eq!(json["edges"][0]["type"], "relation");
        assert!(json["nodes"][0].get("distance").is_none());
    }

    #[tokio::test]
    async fn test_graph_endpoint_rejects_malformed_record() {
        let store = MockGraphStore::with_data(vec![StoredNode::default()], vec![]);
        let state = mock_app_state_with(Arc::new(store), Arc::new(MockAssistant::new()));
        let (status, json) = get_json(state, "/graph").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().contains("malformed record"));
    }

    #[tokio::test]
    async fn test_neighbors_default_depth() {
        let (status, json) = get_json(mock_app_state(), "/neighbors/cd-narrative").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["center"], "cd-narrative");
        assert_eq!(json["depth"], 1);
        assert_eq!(json["nodes"][0]["id"], "nodes/cd-narrative");
        assert!(json["nodes"][0].get("distance").is_none());
        // the narrative links to the campaign plan and the topology
        assert_eq!(json["count"], 3);
        assert_eq!(json["edges"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_neighbors_depth_out_of_range() {
        for depth in [0, 6] {
            let uri = format!("/neighbors/cd-narrative?depth={}", depth);
            let (status, json) = get_json(mock_app_state(), &uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "depth {}", depth);
            assert!(json["error"].as_str().unwrap().contains("depth"));
        }
    }

    #[tokio::test]
    async fn test_neighbors_non_integer_depth_is_json_client_error() {
        let (status, json) = get_json(mock_app_state(), "/neighbors/cd-narrative?depth=two").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("depth"));
    }

    #[tokio::test]
    async fn test_neighbors_prefixed_key_needs_encoding() {
        // a raw slash adds a path segment and matches no route
        let (status, _) = get_json(mock_app_state(), "/neighbors/nodes/cd-narrative").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = get_json(mock_app_state(), "/neighbors/nodes%2Fcd-narrative").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["center"], "cd-narrative");
        assert_eq!(json["nodes"][0]["id"], "nodes/cd-narrative");
    }

    #[tokio::test]
    async fn test_neighbors_unknown_center_is_empty() {
        let (status, json) = get_json(mock_app_state(), "/neighbors/nope?depth=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 0);
        assert!(json["nodes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let (status, json) = get_json(mock_app_state(), "/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_nodes"], 14);
        assert_eq!(json["total_edges"], 10);
        assert_eq!(json["clusters"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let (status, json) = get_json(mock_app_state(), "/search?q=TOPO").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["results"][0]["label"], "Network Topology");

        let (status, json) = get_json(mock_app_state(), "/search?q=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["results"].as_array().unwrap().len(), 14);

        let (status, json) = get_json(mock_app_state(), "/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("q"));
    }

    #[tokio::test]
    async fn test_team_coupling_endpoints() {
        let (status, json) = get_json(mock_app_state(), "/analytics/team-coupling").await;
        assert_eq!(status, StatusCode::OK);
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r["weight"].as_f64().unwrap() <= 100.0));

        let (status, json) = get_json(mock_app_state(), "/analytics/team-coupling-table").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rows"].as_array().unwrap().len(), 10);
        assert!(json["rows"][0]["Source Team"].is_string());
        assert!(json["refresh_time"].is_string());
    }

    #[tokio::test]
    async fn test_offline_store_returns_500_with_cause() {
        for uri in ["/graph", "/stats", "/search?q=apt", "/analytics/team-coupling"] {
            let (status, json) = get_json(offline_state(), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            assert!(
                json["error"]
                    .as_str()
                    .unwrap()
                    .contains("connection refused"),
                "{}",
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_notify_update_echoes_payload() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/analytics/notify-update")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"change_type":"node_added","affected_nodes":["cd-apt"]}"#))
            .unwrap();
        let resp = create_router(mock_app_state()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["received"]["change_type"], "node_added");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_llm_health_online_and_offline() {
        let (status, json) = get_json(mock_app_state(), "/health/llm").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "online");
        assert_eq!(json["model_exists"], true);

        let state = mock_app_state_with(
            Arc::new(sample_graph_store()),
            Arc::new(MockAssistant::failing("connection refused")),
        );
        let (status, json) = get_json(state, "/health/llm").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "offline");
        assert_eq!(json["host"], "mock://assistant");
        assert_eq!(json["message"], "connection refused");
    }

    #[test]
    fn test_graph_error_mapping() {
        assert!(matches!(
            AppError::from(GraphError::Validation("bad".into())),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(GraphError::NotFound("gone".into())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(GraphError::MalformedRecord("x".into())),
            AppError::Internal(_)
        ));
    }
}
