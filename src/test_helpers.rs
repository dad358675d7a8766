//! Test helper factories and mock state builders
//!
//! Provides the sample cyber-range planning graph (four teams, fourteen
//! artifacts, ten cross-team dependencies) and helpers for building a
//! mock AppState around it.
#![allow(dead_code)]

use crate::chat::MockAssistant;
use crate::neo4j::mock::MockGraphStore;
use crate::neo4j::models::*;
use crate::{AppState, Config};
use std::sync::Arc;

// ============================================================================
// Sample data
// ============================================================================

const SAMPLE_NODES: &[(&str, &str, &str, f64)] = &[
    ("cd-dlo", "DLO Requirements", "content_dev", 0.95),
    ("cd-apt", "APT Profile", "content_dev", 0.9),
    ("cd-narrative", "Scenario Narrative", "content_dev", 0.85),
    ("cd-blue-hb", "Blue Team Handbook", "content_dev", 0.9),
    ("rng-topo", "Network Topology", "range", 0.9),
    ("rng-vm-setup", "VM Configuration", "range", 0.85),
    ("rng-validation", "Dead Range Validation", "range", 0.8),
    ("opfor-obj", "Adversarial Objectives", "opfor", 0.9),
    ("opfor-campaign", "Campaign Plan", "opfor", 0.9),
    ("opfor-live", "Live Range Execution", "opfor", 0.95),
    ("opfor-mitre", "MITRE ATT&CK TTPs", "opfor", 0.85),
    ("auto-req", "Automation Requirements", "automation", 0.8),
    ("auto-ttp", "TTP Automation Scripts", "automation", 0.9),
    ("auto-playbook", "Attack Playbook", "automation", 0.9),
];

const SAMPLE_EDGES: &[(&str, &str, f64)] = &[
    ("cd-apt", "opfor-obj", 0.95),
    ("cd-narrative", "opfor-campaign", 0.9),
    ("cd-narrative", "rng-topo", 0.9),
    ("cd-blue-hb", "rng-validation", 0.85),
    ("opfor-mitre", "auto-ttp", 0.9),
    ("opfor-campaign", "auto-playbook", 0.95),
    ("auto-playbook", "opfor-live", 0.95),
    ("auto-playbook", "rng-validation", 0.85),
    ("auto-ttp", "rng-vm-setup", 0.8),
    ("opfor-live", "rng-validation", 0.95),
];

/// The fourteen sample nodes, in insertion order
pub fn sample_nodes() -> Vec<StoredNode> {
    SAMPLE_NODES
        .iter()
        .map(|(key, label, cluster, importance)| {
            StoredNode::keyed(key)
                .with_label(label)
                .with_cluster(cluster)
                .with_importance(*importance)
        })
        .collect()
}

/// The ten sample edges, untyped
pub fn sample_edges() -> Vec<StoredEdge> {
    SAMPLE_EDGES
        .iter()
        .map(|(from, to, weight)| StoredEdge::between(from, to).with_weight(*weight))
        .collect()
}

/// A mock store seeded with the sample graph
pub fn sample_graph_store() -> MockGraphStore {
    MockGraphStore::with_data(sample_nodes(), sample_edges())
}

// ============================================================================
// Mock state builders
// ============================================================================

/// Config pointing at unreachable backends; never used to connect
pub fn test_config() -> Config {
    Config {
        neo4j_uri: "bolt://mock:7687".to_string(),
        neo4j_user: "neo4j".to_string(),
        neo4j_password: "mock".to_string(),
        server_port: 0,
        cors_origins: Vec::new(),
        llm_host: "mock://assistant".to_string(),
        llm_model: "mock-model".to_string(),
        llm_timeout_secs: 5,
        chat_history_exchanges: 10,
    }
}

/// Create a mock AppState over the given store and assistant
pub fn mock_app_state_with(store: Arc<MockGraphStore>, assistant: Arc<MockAssistant>) -> AppState {
    AppState::with_parts(store, assistant, test_config())
}

/// Create a mock AppState over the sample graph with an echoing assistant
pub fn mock_app_state() -> AppState {
    mock_app_state_with(
        Arc::new(sample_graph_store()),
        Arc::new(MockAssistant::new()),
    )
}
