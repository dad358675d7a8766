//! Stored record shapes, as the graph store hands them back
//!
//! Every attribute is optional: deciding what is malformed is the job of
//! [`crate::graph::normalize`], not of deserialization.

use serde::{Deserialize, Serialize};

/// Collection prefix used to qualify node keys into node ids
pub const NODE_COLLECTION: &str = "nodes";

/// Collection prefix used to qualify edge keys into edge ids
pub const EDGE_COLLECTION: &str = "edges";

/// Build a collection-qualified node id from a bare key (`cd-apt` -> `nodes/cd-apt`)
pub fn node_id(key: &str) -> String {
    format!("{}/{}", NODE_COLLECTION, key)
}

/// Strip a leading `nodes/` from a key, if present
pub fn strip_node_prefix(key: &str) -> &str {
    key.strip_prefix("nodes/").unwrap_or(key)
}

// ============================================================================
// Stored documents
// ============================================================================

/// A node document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredNode {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub importance: Option<f64>,
    #[serde(default)]
    pub size: Option<f64>,
}

impl StoredNode {
    /// Minimal node with a key, id derived from it
    pub fn keyed(key: &str) -> Self {
        Self {
            id: Some(node_id(key)),
            key: Some(key.to_string()),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_cluster(mut self, cluster: &str) -> Self {
        self.cluster = Some(cluster.to_string());
        self
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }
}

/// An edge document (directed `_from` -> `_to`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredEdge {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_from", default)]
    pub from: Option<String>,
    #[serde(rename = "_to", default)]
    pub to: Option<String>,
    #[serde(rename = "type", default)]
    pub edge_type: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl StoredEdge {
    /// Edge between two node keys; the edge key is `<from>--<to>`
    pub fn between(from_key: &str, to_key: &str) -> Self {
        Self {
            id: Some(format!("{}/{}--{}", EDGE_COLLECTION, from_key, to_key)),
            from: Some(node_id(from_key)),
            to: Some(node_id(to_key)),
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

// ============================================================================
// Query results
// ============================================================================

/// One step of a bounded-hop traversal: the vertex reached, the edge used to
/// reach it and the length of the path that got there.
///
/// A vertex reachable by several paths shows up once per path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalHit {
    pub node: StoredNode,
    pub edge: Option<StoredEdge>,
    pub distance: u32,
}

/// Node count for one cluster value (`None` = nodes with no cluster)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterCount {
    pub cluster: Option<String>,
    pub count: u64,
}
