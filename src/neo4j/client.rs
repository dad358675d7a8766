//! Neo4j client for reading the property graph
//!
//! Nodes are stored as `(:Node {key, label, cluster, type, importance, size})`
//! and edges as `[:RELATES {key, type, weight}]`. Every query projects the
//! graph entities into the stored-document shape (`_id`, `_key`, `_from`,
//! `_to`) so the rest of the crate never sees Bolt types.

use super::models::*;
use anyhow::{Context, Result};
use neo4rs::{query, Graph, Query};
use std::sync::Arc;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

/// Cypher map projecting node alias `n` into a [`StoredNode`] document
fn node_doc(n: &str) -> String {
    format!(
        "{{_id: '{coll}/' + {n}.key, _key: {n}.key, label: {n}.label, cluster: {n}.cluster, \
         type: {n}.type, importance: toFloat({n}.importance), size: toFloat({n}.size)}}",
        coll = NODE_COLLECTION,
        n = n
    )
}

/// Cypher map projecting relationship alias `r` into a [`StoredEdge`] document
fn edge_doc(r: &str) -> String {
    format!(
        "{{_id: '{coll}/' + coalesce({r}.key, elementId({r})), \
         _from: '{nodes}/' + startNode({r}).key, _to: '{nodes}/' + endNode({r}).key, \
         type: {r}.type, weight: toFloat({r}.weight)}}",
        coll = EDGE_COLLECTION,
        nodes = NODE_COLLECTION,
        r = r
    )
}

impl Neo4jClient {
    /// Create a new Neo4j client
    pub async fn new(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;

        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    /// Check connectivity with a trivial round-trip
    pub async fn health_check(&self) -> Result<bool> {
        let mut result = self.graph.execute(query("RETURN 1 AS ok")).await?;
        Ok(result.next().await?.is_some())
    }

    /// Run a query whose single column `doc` holds a node document
    async fn fetch_nodes(&self, q: Query) -> Result<Vec<StoredNode>> {
        let mut result = self.graph.execute(q).await?;
        let mut nodes = Vec::new();
        while let Some(row) = result.next().await? {
            nodes.push(row.get("doc")?);
        }
        Ok(nodes)
    }

    /// Run a query returning a single integer column `total`
    async fn fetch_total(&self, q: Query) -> Result<u64> {
        let mut result = self.graph.execute(q).await?;
        if let Some(row) = result.next().await? {
            let total: i64 = row.get("total").unwrap_or(0);
            Ok(total.max(0) as u64)
        } else {
            Ok(0)
        }
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// List every node, ordered by key
    pub async fn list_nodes(&self) -> Result<Vec<StoredNode>> {
        let cypher = format!(
            "MATCH (n:Node) RETURN {} AS doc ORDER BY n.key",
            node_doc("n")
        );
        self.fetch_nodes(query(&cypher)).await
    }

    /// List every edge, ordered by endpoints then key
    pub async fn list_edges(&self) -> Result<Vec<StoredEdge>> {
        let cypher = format!(
            "MATCH (a:Node)-[r:RELATES]->(b:Node) RETURN {} AS doc ORDER BY a.key, b.key, r.key",
            edge_doc("r")
        );
        let mut result = self.graph.execute(query(&cypher)).await?;
        let mut edges = Vec::new();
        while let Some(row) = result.next().await? {
            edges.push(row.get("doc")?);
        }
        Ok(edges)
    }

    // ========================================================================
    // Lookups and traversal
    // ========================================================================

    /// Get a node by its bare key
    pub async fn get_node(&self, key: &str) -> Result<Option<StoredNode>> {
        let cypher = format!(
            "MATCH (n:Node {{key: $key}}) RETURN {} AS doc LIMIT 1",
            node_doc("n")
        );
        let q = query(&cypher).param("key", key);
        Ok(self.fetch_nodes(q).await?.into_iter().next())
    }

    /// Walk `1..=depth` hops in either direction from `key`.
    ///
    /// Variable-length bounds cannot be bound as parameters in Cypher, so the
    /// depth is formatted into the statement; callers validate it first.
    pub async fn traverse(&self, key: &str, depth: u32) -> Result<Vec<TraversalHit>> {
        let cypher = format!(
            r#"
            MATCH p = (c:Node {{key: $key}})-[:RELATES*1..{depth}]-(v:Node)
            WITH v, last(relationships(p)) AS r, length(p) AS distance
            RETURN {node} AS node, {edge} AS edge, distance
            ORDER BY distance
            "#,
            depth = depth,
            node = node_doc("v"),
            edge = edge_doc("r"),
        );
        let q = query(&cypher).param("key", key);

        let mut result = self.graph.execute(q).await?;
        let mut hits = Vec::new();
        while let Some(row) = result.next().await? {
            let distance: i64 = row.get("distance")?;
            hits.push(TraversalHit {
                node: row.get("node")?,
                edge: row.get("edge").ok(),
                distance: distance.max(0) as u32,
            });
        }
        tracing::debug!("Traversal from {} (depth {}): {} hits", key, depth, hits.len());
        Ok(hits)
    }

    /// Case-insensitive substring search on node labels
    pub async fn search_nodes(&self, search: &str) -> Result<Vec<StoredNode>> {
        let cypher = format!(
            "MATCH (n:Node) WHERE toLower(n.label) CONTAINS toLower($q) RETURN {} AS doc ORDER BY n.key",
            node_doc("n")
        );
        self.fetch_nodes(query(&cypher).param("q", search)).await
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    pub async fn count_nodes(&self) -> Result<u64> {
        self.fetch_total(query("MATCH (n:Node) RETURN count(n) AS total"))
            .await
    }

    pub async fn count_edges(&self) -> Result<u64> {
        self.fetch_total(query(
            "MATCH (:Node)-[r:RELATES]->(:Node) RETURN count(r) AS total",
        ))
        .await
    }

    /// Node count per cluster value, ordered by cluster
    pub async fn cluster_counts(&self) -> Result<Vec<ClusterCount>> {
        let q = query(
            r#"
            MATCH (n:Node)
            RETURN n.cluster AS cluster, count(n) AS count
            ORDER BY cluster
            "#,
        );

        let mut result = self.graph.execute(q).await?;
        let mut counts = Vec::new();
        while let Some(row) = result.next().await? {
            let count: i64 = row.get("count").unwrap_or(0);
            counts.push(ClusterCount {
                cluster: row.get::<Option<String>>("cluster").unwrap_or(None),
                count: count.max(0) as u64,
            });
        }
        Ok(counts)
    }
}
