//! In-memory mock implementation of GraphStore for testing.
//!
//! Documents live in `tokio::sync::RwLock<Vec<_>>` collections, kept in
//! insertion order. Traversal follows Cypher variable-length semantics:
//! every path of length `1..=depth`, edges explored in both directions, no
//! edge reused within a path.
//! Conditionally compiled with `#[cfg(test)]`.

use crate::neo4j::models::*;
use crate::neo4j::traits::GraphStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// In-memory mock implementation of GraphStore for testing.
pub struct MockGraphStore {
    pub nodes: RwLock<Vec<StoredNode>>,
    pub edges: RwLock<Vec<StoredEdge>>,
    /// When set, every read fails as if the connection dropped
    pub offline: AtomicBool,
}

impl Default for MockGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGraphStore {
    /// Create a new empty MockGraphStore.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(Vec::new()),
            edges: RwLock::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Create a store pre-seeded with documents
    pub fn with_data(nodes: Vec<StoredNode>, edges: Vec<StoredEdge>) -> Self {
        Self {
            nodes: RwLock::new(nodes),
            edges: RwLock::new(edges),
            offline: AtomicBool::new(false),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn health_check(&self) -> Result<bool> {
        Ok(!self.offline.load(Ordering::SeqCst))
    }

    async fn list_nodes(&self) -> Result<Vec<StoredNode>> {
        self.check_online()?;
        Ok(self.nodes.read().await.clone())
    }

    async fn list_edges(&self) -> Result<Vec<StoredEdge>> {
        self.check_online()?;
        Ok(self.edges.read().await.clone())
    }

    async fn get_node(&self, key: &str) -> Result<Option<StoredNode>> {
        self.check_online()?;
        let id = node_id(key);
        Ok(self
            .nodes
            .read()
            .await
            .iter()
            .find(|n| n.id.as_deref() == Some(id.as_str()))
            .cloned())
    }

    async fn traverse(&self, key: &str, depth: u32) -> Result<Vec<TraversalHit>> {
        self.check_online()?;
        let nodes = self.nodes.read().await;
        let edges = self.edges.read().await;

        let by_id: BTreeMap<&str, &StoredNode> = nodes
            .iter()
            .filter_map(|n| n.id.as_deref().map(|id| (id, n)))
            .collect();

        let start = node_id(key);
        if !by_id.contains_key(start.as_str()) {
            return Ok(Vec::new());
        }

        // Each open path: (current vertex, indices of edges already used)
        let mut frontier: Vec<(String, Vec<usize>)> = vec![(start, Vec::new())];
        let mut hits = Vec::new();

        for distance in 1..=depth {
            let mut next = Vec::new();
            for (current, used) in &frontier {
                for (idx, edge) in edges.iter().enumerate() {
                    if used.contains(&idx) {
                        continue;
                    }
                    let (Some(from), Some(to)) = (edge.from.as_deref(), edge.to.as_deref())
                    else {
                        continue;
                    };
                    let other = if from == current {
                        to
                    } else if to == current {
                        from
                    } else {
                        continue;
                    };
                    // Dangling endpoints are never matched
                    let Some(node) = by_id.get(other) else {
                        continue;
                    };

                    hits.push(TraversalHit {
                        node: (*node).clone(),
                        edge: Some(edge.clone()),
                        distance,
                    });

                    let mut path = used.clone();
                    path.push(idx);
                    next.push((other.to_string(), path));
                }
            }
            frontier = next;
        }

        Ok(hits)
    }

    async fn search_nodes(&self, query: &str) -> Result<Vec<StoredNode>> {
        self.check_online()?;
        let needle = query.to_lowercase();
        Ok(self
            .nodes
            .read()
            .await
            .iter()
            .filter(|n| {
                n.label
                    .as_deref()
                    .is_some_and(|l| l.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn count_nodes(&self) -> Result<u64> {
        self.check_online()?;
        Ok(self.nodes.read().await.len() as u64)
    }

    async fn count_edges(&self) -> Result<u64> {
        self.check_online()?;
        Ok(self.edges.read().await.len() as u64)
    }

    async fn cluster_counts(&self) -> Result<Vec<ClusterCount>> {
        self.check_online()?;
        let mut counts: BTreeMap<Option<String>, u64> = BTreeMap::new();
        for node in self.nodes.read().await.iter() {
            *counts.entry(node.cluster.clone()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(cluster, count)| ClusterCount { cluster, count })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> MockGraphStore {
        // a - b - c, plus a dangling edge c -> ghost
        MockGraphStore::with_data(
            vec![
                StoredNode::keyed("a"),
                StoredNode::keyed("b"),
                StoredNode::keyed("c"),
            ],
            vec![
                StoredEdge::between("a", "b"),
                StoredEdge::between("c", "b"),
                StoredEdge::between("c", "ghost"),
            ],
        )
    }

    #[tokio::test]
    async fn test_traverse_is_undirected() {
        let store = chain();
        let hits = store.traverse("b", 1).await.unwrap();
        let reached: Vec<_> = hits.iter().map(|h| h.node.key.clone().unwrap()).collect();
        assert_eq!(reached, vec!["a".to_string(), "c".to_string()]);
        assert!(hits.iter().all(|h| h.distance == 1));
    }

    #[tokio::test]
    async fn test_traverse_skips_dangling_and_reuses_no_edge() {
        let store = chain();
        let hits = store.traverse("a", 3).await.unwrap();
        let reached: Vec<_> = hits
            .iter()
            .map(|h| (h.node.key.clone().unwrap(), h.distance))
            .collect();
        assert_eq!(reached, vec![("b".to_string(), 1), ("c".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_traverse_unknown_center_is_empty() {
        let store = chain();
        assert!(store.traverse("nope", 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline_store_errors() {
        let store = chain();
        store.set_offline(true);
        assert!(store.list_nodes().await.is_err());
        assert!(!store.health_check().await.unwrap());
    }
}
