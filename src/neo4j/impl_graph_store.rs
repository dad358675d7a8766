//! GraphStore implementation for Neo4jClient
//!
//! Delegates every trait method to the inherent method on `Neo4jClient`.

use crate::neo4j::client::Neo4jClient;
use crate::neo4j::models::*;
use crate::neo4j::traits::GraphStore;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn health_check(&self) -> Result<bool> {
        self.health_check().await
    }

    async fn list_nodes(&self) -> Result<Vec<StoredNode>> {
        self.list_nodes().await
    }

    async fn list_edges(&self) -> Result<Vec<StoredEdge>> {
        self.list_edges().await
    }

    async fn get_node(&self, key: &str) -> Result<Option<StoredNode>> {
        self.get_node(key).await
    }

    async fn traverse(&self, key: &str, depth: u32) -> Result<Vec<TraversalHit>> {
        self.traverse(key, depth).await
    }

    async fn search_nodes(&self, query: &str) -> Result<Vec<StoredNode>> {
        self.search_nodes(query).await
    }

    async fn count_nodes(&self) -> Result<u64> {
        self.count_nodes().await
    }

    async fn count_edges(&self) -> Result<u64> {
        self.count_edges().await
    }

    async fn cluster_counts(&self) -> Result<Vec<ClusterCount>> {
        self.cluster_counts().await
    }
}
