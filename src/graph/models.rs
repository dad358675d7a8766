//! Wire models for the graph API.
//!
//! These are the stable JSON shapes promised to the dashboard and the BI
//! tool:
//!
//! - [`GraphNode`] / [`GraphEdge`]: normalized entities, defaults filled
//! - [`GraphSnapshot`]: the whole graph
//! - [`Subgraph`]: a bounded neighborhood around a center node
//! - [`GraphStats`] / [`ClusterStat`]: counts
//! - [`CouplingMatrix`] / [`CouplingRow`] / [`CouplingTableRow`]: team coupling analytics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Importance used when a node does not carry one
pub const DEFAULT_IMPORTANCE: f64 = 0.5;

/// Rendering size used when a node does not carry one
pub const DEFAULT_SIZE: f64 = 40.0;

/// Edge type used when an edge does not carry one
pub const DEFAULT_EDGE_TYPE: &str = "relation";

/// Edge weight used on the wire when an edge does not carry one
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

// ============================================================================
// Entities
// ============================================================================

/// A normalized graph vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub cluster: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub importance: f64,
    pub size: f64,
    /// Hop distance from the traversal center; absent on the center itself
    /// and outside traversal results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
}

/// A normalized, directed graph relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    pub weight: f64,
}

// ============================================================================
// Query results
// ============================================================================

/// The complete graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Bounded neighborhood of a center node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgraph {
    /// Bare key of the requested center (without the `nodes/` prefix)
    pub center: String,
    pub depth: u32,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub count: usize,
}

/// Search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<GraphNode>,
}

/// Node count for one cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStat {
    pub cluster: Option<String>,
    pub count: u64,
}

/// Graph-wide counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: u64,
    pub total_edges: u64,
    pub clusters: Vec<ClusterStat>,
}

// ============================================================================
// Coupling analytics
// ============================================================================

/// Symmetric cluster → cluster → score map, scores in (0, 100].
///
/// `BTreeMap` keeps emission order sorted by cluster name.
pub type CouplingMatrix = BTreeMap<String, BTreeMap<String, f64>>;

/// One directed cell of the coupling matrix, formatted for the BI tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingRow {
    /// Display name of the source team
    pub source: String,
    /// Display name of the target team
    pub target: String,
    /// Normalized coupling score, rounded to 2 decimals
    pub weight: f64,
    /// Direct edges between the two clusters, either direction
    pub connection_count: usize,
    /// RFC 3339 timestamp of the computation
    pub last_updated: String,
}

/// Spreadsheet-style row with human column names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingTableRow {
    #[serde(rename = "Source Team")]
    pub source_team: String,
    #[serde(rename = "Target Team")]
    pub target_team: String,
    #[serde(rename = "Coupling Score")]
    pub coupling_score: f64,
    #[serde(rename = "Connection Count")]
    pub connection_count: usize,
    #[serde(rename = "Last Updated")]
    pub last_updated: String,
}

/// Table response for `/analytics/team-coupling-table`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingTable {
    pub rows: Vec<CouplingTableRow>,
    pub refresh_time: String,
}
