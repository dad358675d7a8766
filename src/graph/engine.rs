//! Graph service: the single entry point the HTTP layer talks to.
//!
//! Every method is request-scoped: it reads from the store, reshapes, and
//! returns. Nothing is cached between calls.

use super::coupling::{coupling_matrix, coupling_rows, coupling_table};
use super::error::{GraphError, StoreResultExt};
use super::models::*;
use super::normalize::{normalize_edge, normalize_node};
use super::traversal::{self, TraversalDepth};
use crate::neo4j::GraphStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Read-only graph operations over a `GraphStore`
#[derive(Clone)]
pub struct GraphService {
    store: Arc<dyn GraphStore>,
}

impl GraphService {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Whether the store answers a round-trip
    pub async fn is_connected(&self) -> bool {
        self.store.health_check().await.unwrap_or(false)
    }

    /// Every node and edge, normalized
    pub async fn full_graph(&self) -> Result<GraphSnapshot, GraphError> {
        let context = "Failed to fetch graph";
        let nodes = self.store.list_nodes().await.store_context(context)?;
        let edges = self.store.list_edges().await.store_context(context)?;

        Ok(GraphSnapshot {
            nodes: nodes
                .iter()
                .map(normalize_node)
                .collect::<Result<_, _>>()?,
            edges: edges
                .iter()
                .map(normalize_edge)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Bounded neighborhood of a node
    pub async fn neighbors(
        &self,
        center_key: &str,
        depth: TraversalDepth,
    ) -> Result<Subgraph, GraphError> {
        traversal::neighbors(self.store.as_ref(), center_key, depth).await
    }

    /// Node/edge totals and per-cluster node counts, sorted by cluster
    pub async fn stats(&self) -> Result<GraphStats, GraphError> {
        let context = "Failed to fetch stats";
        let total_nodes = self.store.count_nodes().await.store_context(context)?;
        let total_edges = self.store.count_edges().await.store_context(context)?;
        let mut clusters: Vec<ClusterStat> = self
            .store
            .cluster_counts()
            .await
            .store_context(context)?
            .into_iter()
            .map(|c| ClusterStat {
                cluster: c.cluster,
                count: c.count,
            })
            .collect();
        clusters.sort_by(|a, b| a.cluster.cmp(&b.cluster));

        Ok(GraphStats {
            total_nodes,
            total_edges,
            clusters,
        })
    }

    /// Case-insensitive label search. A blank query matches every labelled node.
    pub async fn search(&self, q: &str) -> Result<SearchResults, GraphError> {
        let found = self
            .store
            .search_nodes(q.trim())
            .await
            .store_context("Search failed")?;
        Ok(SearchResults {
            results: found
                .iter()
                .map(normalize_node)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Coupling flattened for the BI tool, stamped with `now`
    pub async fn team_coupling(&self, now: DateTime<Utc>) -> Result<Vec<CouplingRow>, GraphError> {
        let context = "Failed to compute team coupling";
        let nodes = self.store.list_nodes().await.store_context(context)?;
        let edges = self.store.list_edges().await.store_context(context)?;
        let matrix = coupling_matrix(&nodes, &edges);
        Ok(coupling_rows(&matrix, &nodes, &edges, now))
    }

    /// Coupling rows rendered as a spreadsheet-style table
    pub async fn team_coupling_table(
        &self,
        now: DateTime<Utc>,
    ) -> Result<CouplingTable, GraphError> {
        let rows = self.team_coupling(now).await?;
        Ok(coupling_table(&rows, now))
    }
}
