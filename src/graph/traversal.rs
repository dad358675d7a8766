//! Bounded-depth neighborhood assembly.
//!
//! The store does the walking; this module turns its per-path hits into a
//! deduplicated subgraph:
//!
//! 1. the center (when it exists) is always `nodes[0]` and carries no distance
//! 2. other nodes follow in discovery order, each with the shortest distance seen
//! 3. every edge touched appears exactly once, whichever endpoint found it

use super::error::{GraphError, StoreResultExt};
use super::models::{GraphEdge, GraphNode, Subgraph};
use super::normalize::{normalize_edge, normalize_node, with_distance};
use crate::neo4j::models::strip_node_prefix;
use crate::neo4j::GraphStore;
use std::collections::{HashMap, HashSet};

/// Smallest accepted hop depth
pub const MIN_DEPTH: u32 = 1;

/// Largest accepted hop depth
pub const MAX_DEPTH: u32 = 5;

/// A hop depth known to lie in `[MIN_DEPTH, MAX_DEPTH]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalDepth(u32);

impl TraversalDepth {
    pub fn new(depth: u32) -> Result<Self, GraphError> {
        if (MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            Ok(Self(depth))
        } else {
            Err(GraphError::Validation(format!(
                "depth must be between {} and {} (got {})",
                MIN_DEPTH, MAX_DEPTH, depth
            )))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for TraversalDepth {
    fn default() -> Self {
        Self(MIN_DEPTH)
    }
}

/// Assemble the neighborhood of `center_key` within `depth` hops.
///
/// An unknown center yields an empty subgraph rather than an error.
pub async fn neighbors(
    store: &dyn GraphStore,
    center_key: &str,
    depth: TraversalDepth,
) -> Result<Subgraph, GraphError> {
    let key = strip_node_prefix(center_key);
    let context = "Failed to fetch neighbors";

    let hits = store.traverse(key, depth.get()).await.store_context(context)?;
    let center = store.get_node(key).await.store_context(context)?;

    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut edges: Vec<GraphEdge> = Vec::new();
    // node id -> position in `nodes`
    let mut node_index: HashMap<String, usize> = HashMap::new();
    let mut seen_edges: HashSet<String> = HashSet::new();

    if let Some(center) = center {
        let center = normalize_node(&center)?;
        node_index.insert(center.id.clone(), 0);
        nodes.push(center);
    }

    for hit in hits {
        match normalize_node(&hit.node) {
            Ok(node) => match node_index.get(&node.id) {
                Some(&pos) => {
                    // Keep first-discovery position, lower the distance if a
                    // shorter path shows up later. The center never gets one.
                    if let Some(current) = nodes[pos].distance {
                        if hit.distance < current {
                            nodes[pos].distance = Some(hit.distance);
                        }
                    }
                }
                None => {
                    node_index.insert(node.id.clone(), nodes.len());
                    nodes.push(with_distance(node, hit.distance));
                }
            },
            Err(e) => tracing::warn!("Skipping traversal node from {}: {}", key, e),
        }

        if let Some(edge) = hit.edge {
            match normalize_edge(&edge) {
                Ok(edge) => {
                    if seen_edges.insert(edge.id.clone()) {
                        edges.push(edge);
                    }
                }
                Err(e) => tracing::warn!("Skipping traversal edge from {}: {}", key, e),
            }
        }
    }

    tracing::debug!(
        "Neighbors of {} at depth {}: {} nodes, {} edges",
        key,
        depth.get(),
        nodes.len(),
        edges.len()
    );

    Ok(Subgraph {
        center: key.to_string(),
        depth: depth.get(),
        count: nodes.len(),
        nodes,
        edges,
    })
}
