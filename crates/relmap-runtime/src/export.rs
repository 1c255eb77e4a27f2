//! Graph exporter: writes a filtered view as nodes and weighted edges.
//!
//! The output is the node-link shape force-directed renderers consume:
//! researchers as nodes, visible relevance pairs as links with their score.

use crate::dataset::{Dataset, VisibleEdge};
use relmap_core::filter::FilterCriteria;
use serde::Serialize;
use std::collections::HashMap;

/// Exported researcher node.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedNode {
    pub id: String,
    pub name: String,
    pub affiliation: String,
    pub program: String,
    /// Number of visible edges touching this node.
    pub degree: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_researchers: usize,
    pub criteria: FilterCriteria,
    pub exported_at: u64,
}

/// A filtered view of the relevance graph ready for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedGraph {
    pub nodes: Vec<ExportedNode>,
    pub edges: Vec<VisibleEdge>,
    pub metadata: ExportMetadata,
}

impl ExportedGraph {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Export the part of the dataset visible under `criteria`.
pub fn export_view(dataset: &Dataset, criteria: &FilterCriteria) -> ExportedGraph {
    let view = dataset.view(criteria);

    let mut degrees: HashMap<&str, usize> = HashMap::new();
    for edge in &view.edges {
        *degrees.entry(edge.source.as_str()).or_insert(0) += 1;
        *degrees.entry(edge.target.as_str()).or_insert(0) += 1;
    }

    let nodes: Vec<ExportedNode> = view
        .records
        .iter()
        .map(|record| ExportedNode {
            id: record.id.clone(),
            name: record.name.clone(),
            affiliation: record.affiliation.clone(),
            program: record.program.clone(),
            degree: degrees.get(record.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    ExportedGraph {
        metadata: ExportMetadata {
            node_count: nodes.len(),
            edge_count: view.edges.len(),
            total_researchers: dataset.index().len(),
            criteria: criteria.clone(),
            exported_at: unix_now(),
        },
        nodes,
        edges: view.edges.clone(),
    }
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
