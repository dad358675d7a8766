//! Stored record → wire record, with defaults filled in

use super::error::GraphError;
use super::models::*;
use crate::neo4j::models::{StoredEdge, StoredNode};

/// Normalize a node document.
///
/// Only `_id` is required. The label falls back to `_key`, then to the last
/// segment of `_id`.
pub fn normalize_node(node: &StoredNode) -> Result<GraphNode, GraphError> {
    let id = node
        .id
        .clone()
        .ok_or_else(|| GraphError::MalformedRecord("node without _id".into()))?;

    let label = node
        .label
        .clone()
        .or_else(|| node.key.clone())
        .unwrap_or_else(|| id.rsplit('/').next().unwrap_or(&id).to_string());

    Ok(GraphNode {
        id,
        label,
        cluster: node.cluster.clone(),
        node_type: node.node_type.clone(),
        importance: node.importance.unwrap_or(DEFAULT_IMPORTANCE),
        size: node.size.unwrap_or(DEFAULT_SIZE),
        distance: None,
    })
}

/// Normalize an edge document. `_id`, `_from` and `_to` are required.
pub fn normalize_edge(edge: &StoredEdge) -> Result<GraphEdge, GraphError> {
    let missing = |field: &str| GraphError::MalformedRecord(format!("edge without {}", field));

    Ok(GraphEdge {
        id: edge.id.clone().ok_or_else(|| missing("_id"))?,
        source: edge.from.clone().ok_or_else(|| missing("_from"))?,
        target: edge.to.clone().ok_or_else(|| missing("_to"))?,
        edge_type: edge
            .edge_type
            .clone()
            .unwrap_or_else(|| DEFAULT_EDGE_TYPE.to_string()),
        weight: edge.weight.unwrap_or(DEFAULT_EDGE_WEIGHT),
    })
}

/// Annotate a normalized node with its hop distance
pub fn with_distance(mut node: GraphNode, distance: u32) -> GraphNode {
    node.distance = Some(distance);
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_defaults() {
        let node = normalize_node(&StoredNode::keyed("cd-apt")).unwrap();
        assert_eq!(node.id, "nodes/cd-apt");
        assert_eq!(node.label, "cd-apt");
        assert_eq!(node.importance, 0.5);
        assert_eq!(node.size, 40.0);
        assert!(node.cluster.is_none());
        assert!(node.node_type.is_none());
        assert!(node.distance.is_none());
    }

    #[test]
    fn test_node_keeps_stored_values() {
        let stored = StoredNode {
            size: Some(52.0),
            node_type: Some("research".into()),
            ..StoredNode::keyed("cd-apt")
                .with_label("APT Profile")
                .with_cluster("content_dev")
                .with_importance(0.9)
        };
        let node = normalize_node(&stored).unwrap();
        assert_eq!(node.label, "APT Profile");
        assert_eq!(node.cluster.as_deref(), Some("content_dev"));
        assert_eq!(node.node_type.as_deref(), Some("research"));
        assert_eq!(node.importance, 0.9);
        assert_eq!(node.size, 52.0);
    }

    #[test]
    fn test_label_falls_back_to_id_segment_without_key() {
        let stored = StoredNode {
            id: Some("nodes/rng-topo".into()),
            ..Default::default()
        };
        assert_eq!(normalize_node(&stored).unwrap().label, "rng-topo");
    }

    #[test]
    fn test_node_without_id_is_malformed() {
        let stored = StoredNode {
            key: Some("orphan".into()),
            ..Default::default()
        };
        assert!(matches!(
            normalize_node(&stored),
            Err(GraphError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_edge_defaults() {
        let edge = normalize_edge(&StoredEdge::between("a", "b")).unwrap();
        assert_eq!(edge.id, "edges/a--b");
        assert_eq!(edge.source, "nodes/a");
        assert_eq!(edge.target, "nodes/b");
        assert_eq!(edge.edge_type, "relation");
        assert_eq!(edge.weight, 1.0);
    }

    #[test]
    fn test_edge_requires_endpoints() {
        let mut stored = StoredEdge::between("a", "b");
        stored.to = None;
        let err = normalize_edge(&stored).unwrap_err();
        assert_eq!(err.to_string(), "malformed record: edge without _to");
    }
}
