//! GraphStore trait definition
//!
//! Defines the narrow, read-only interface the graph layer needs from the
//! database. `Neo4jClient` is the production implementation; the mock
//! store backs the unit tests.

use crate::neo4j::models::*;
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for graph database reads.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// request handlers as `Arc<dyn GraphStore>`.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Check connectivity with the database
    async fn health_check(&self) -> Result<bool>;

    // ========================================================================
    // Collections
    // ========================================================================

    /// All node documents, in a stable order
    async fn list_nodes(&self) -> Result<Vec<StoredNode>>;

    /// All edge documents, in a stable order
    async fn list_edges(&self) -> Result<Vec<StoredEdge>>;

    // ========================================================================
    // Lookups and traversal
    // ========================================================================

    /// Document lookup by bare node key
    async fn get_node(&self, key: &str) -> Result<Option<StoredNode>>;

    /// Undirected traversal from `key`, one hit per path of length `1..=depth`
    async fn traverse(&self, key: &str, depth: u32) -> Result<Vec<TraversalHit>>;

    /// Nodes whose label contains `query`, case-insensitively
    async fn search_nodes(&self, query: &str) -> Result<Vec<StoredNode>>;

    // ========================================================================
    // Aggregates
    // ========================================================================

    async fn count_nodes(&self) -> Result<u64>;

    async fn count_edges(&self) -> Result<u64>;

    /// Node count grouped by cluster
    async fn cluster_counts(&self) -> Result<Vec<ClusterCount>>;
}

/// Stand-in used when the database could not be reached at startup.
///
/// Every call fails, so each endpoint reports the outage instead of the
/// server refusing to start.
pub struct DisconnectedGraphStore {
    reason: String,
}

impl DisconnectedGraphStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T> {
        anyhow::bail!("Database not connected: {}", self.reason)
    }
}

#[async_trait]
impl GraphStore for DisconnectedGraphStore {
    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    async fn list_nodes(&self) -> Result<Vec<StoredNode>> {
        self.fail()
    }

    async fn list_edges(&self) -> Result<Vec<StoredEdge>> {
        self.fail()
    }

    async fn get_node(&self, _key: &str) -> Result<Option<StoredNode>> {
        self.fail()
    }

    async fn traverse(&self, _key: &str, _depth: u32) -> Result<Vec<TraversalHit>> {
        self.fail()
    }

    async fn search_nodes(&self, _query: &str) -> Result<Vec<StoredNode>> {
        self.fail()
    }

    async fn count_nodes(&self) -> Result<u64> {
        self.fail()
    }

    async fn count_edges(&self) -> Result<u64> {
        self.fail()
    }

    async fn cluster_counts(&self) -> Result<Vec<ClusterCount>> {
        self.fail()
    }
}
