//! Cross-cluster ("team") coupling analytics.
//!
//! For every edge whose endpoints sit in two different clusters:
//!
//! ```text
//! score = weight × (importance(source) + importance(target)) / 2
//! ```
//!
//! Scores accumulate symmetrically into `[a][b]` and `[b][a]`, then the whole
//! matrix is scaled so the largest cell is exactly 100. Edges are folded in
//! the order the store returns them, which keeps the floating-point sums
//! reproducible.

use super::models::*;
use crate::neo4j::models::{StoredEdge, StoredNode};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Edge weight assumed by the coupling score when an edge carries none
pub const COUPLING_DEFAULT_WEIGHT: f64 = 0.5;

/// Cluster and importance of every node that has both an id and a cluster
fn cluster_lookup(nodes: &[StoredNode]) -> HashMap<&str, (&str, f64)> {
    nodes
        .iter()
        .filter_map(|n| {
            let id = n.id.as_deref()?;
            let cluster = n.cluster.as_deref()?;
            Some((id, (cluster, n.importance.unwrap_or(DEFAULT_IMPORTANCE))))
        })
        .collect()
}

/// Resolve both endpoints of an edge, `None` if either is unknown
fn endpoints<'a>(
    lookup: &HashMap<&'a str, (&'a str, f64)>,
    edge: &StoredEdge,
) -> Option<((&'a str, f64), (&'a str, f64))> {
    let source = lookup.get(edge.from.as_deref()?)?;
    let target = lookup.get(edge.to.as_deref()?)?;
    Some((*source, *target))
}

/// Compute the normalized, symmetric coupling matrix
pub fn coupling_matrix(nodes: &[StoredNode], edges: &[StoredEdge]) -> CouplingMatrix {
    let lookup = cluster_lookup(nodes);
    let mut matrix = CouplingMatrix::new();

    for edge in edges {
        let Some(((source_cluster, source_imp), (target_cluster, target_imp))) =
            endpoints(&lookup, edge)
        else {
            tracing::debug!("Coupling: skipping edge {:?} with unresolved endpoint", edge.id);
            continue;
        };
        if source_cluster == target_cluster {
            continue;
        }

        let avg_importance = (source_imp + target_imp) / 2.0;
        let score = edge.weight.unwrap_or(COUPLING_DEFAULT_WEIGHT) * avg_importance;

        *matrix
            .entry(source_cluster.to_string())
            .or_default()
            .entry(target_cluster.to_string())
            .or_default() += score;
        *matrix
            .entry(target_cluster.to_string())
            .or_default()
            .entry(source_cluster.to_string())
            .or_default() += score;
    }

    let max = matrix
        .values()
        .flat_map(|targets| targets.values())
        .fold(0.0_f64, |acc, &v| acc.max(v));

    if max > 0.0 {
        for targets in matrix.values_mut() {
            for value in targets.values_mut() {
                *value = *value / max * 100.0;
            }
        }
    }

    matrix
}

/// Direct edges between clusters `a` and `b`, counted in either direction
pub fn connection_count(nodes: &[StoredNode], edges: &[StoredEdge], a: &str, b: &str) -> usize {
    let lookup = cluster_lookup(nodes);
    edges
        .iter()
        .filter_map(|e| endpoints(&lookup, e))
        .filter(|((sc, _), (tc, _))| (*sc == a && *tc == b) || (*sc == b && *tc == a))
        .count()
}

/// Display name for a cluster id (`content_dev` -> `Content Dev`)
pub fn team_display_name(cluster: &str) -> String {
    match cluster {
        "content_dev" => "Content Dev".to_string(),
        "range" => "Range".to_string(),
        "opfor" => "OPFOR".to_string(),
        "automation" => "Automation".to_string(),
        other => other
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|word| {
                let mut c = word.chars();
                match c.next() {
                    None => String::new(),
                    Some(f) => f.to_uppercase().chain(c.flat_map(char::to_lowercase)).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Flatten a matrix into BI rows, sorted by source then target cluster id
pub fn coupling_rows(
    matrix: &CouplingMatrix,
    nodes: &[StoredNode],
    edges: &[StoredEdge],
    now: DateTime<Utc>,
) -> Vec<CouplingRow> {
    let timestamp = now.to_rfc3339();
    matrix
        .iter()
        .flat_map(|(source, targets)| targets.iter().map(move |(target, w)| (source, target, *w)))
        .filter(|(_, _, weight)| *weight > 0.0)
        .map(|(source, target, weight)| CouplingRow {
            source: team_display_name(source),
            target: team_display_name(target),
            weight: round2(weight),
            connection_count: connection_count(nodes, edges, source, target),
            last_updated: timestamp.clone(),
        })
        .collect()
}

/// Spreadsheet-style rendering of coupling rows
pub fn coupling_table(rows: &[CouplingRow], now: DateTime<Utc>) -> CouplingTable {
    CouplingTable {
        rows: rows
            .iter()
            .map(|r| CouplingTableRow {
                source_team: r.source.clone(),
                target_team: r.target.clone(),
                coupling_score: r.weight,
                connection_count: r.connection_count,
                last_updated: r.last_updated.clone(),
            })
            .collect(),
        refresh_time: now.to_rfc3339(),
    }
}
