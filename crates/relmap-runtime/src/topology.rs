//! Petgraph projection of a relevance index.
//!
//! The index stores one ranked list per researcher. For structural questions
//! (components, isolated researchers, hubs) it is projected once into an
//! undirected petgraph `Graph` with one edge per connected pair.

use petgraph::graph::{Graph, NodeIndex};
use petgraph::Undirected;
use relmap_core::relevance::RelevanceIndex;
use serde::Serialize;
use std::collections::HashMap;

/// Undirected relevance graph: researcher ids as nodes, scores as edge weights.
pub struct RelevanceGraph {
    graph: Graph<String, u32, Undirected>,
    node_index: HashMap<String, NodeIndex>,
}

/// A researcher and the number of peers it is connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeEntry {
    pub id: String,
    pub degree: usize,
    /// Sum of the scores of all its connections.
    pub strength: u32,
}

impl RelevanceGraph {
    pub fn from_index(index: &RelevanceIndex) -> Self {
        let mut graph = Graph::new_undirected();
        let mut node_index = HashMap::with_capacity(index.len());

        for (id, _) in index.iter() {
            let idx = graph.add_node(id.to_string());
            node_index.insert(id.to_string(), idx);
        }

        for (id, connections) in index.iter() {
            let from = node_index[id];
            for connection in connections {
                let Some(&to) = node_index.get(&connection.peer_id) else {
                    continue;
                };
                // Each pair is stored on both sides; add it once.
                if from.index() < to.index() {
                    graph.add_edge(from, to, connection.score);
                }
            }
        }

        Self { graph, node_index }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of connected pairs.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn connected_components(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// Researchers without any connection, in record order.
    pub fn isolated(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|idx| self.graph.neighbors(*idx).next().is_none())
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    pub fn degree(&self, id: &str) -> usize {
        self.node_index
            .get(id)
            .map(|idx| self.graph.neighbors(*idx).count())
            .unwrap_or(0)
    }

    /// The `top` most connected researchers, by degree then total score.
    pub fn degree_ranking(&self, top: usize) -> Vec<DegreeEntry> {
        let mut entries: Vec<DegreeEntry> = self
            .graph
            .node_indices()
            .map(|idx| DegreeEntry {
                id: self.graph[idx].clone(),
                degree: self.graph.edges(idx).count(),
                strength: self
                    .graph
                    .edges(idx)
                    .map(|e| *e.weight())
                    .fold(0, u32::saturating_add),
            })
            .collect();

        entries.sort_by(|a, b| {
            b.degree
                .cmp(&a.degree)
                .then_with(|| b.strength.cmp(&a.strength))
        });
        entries.truncate(top);
        entries
    }

    /// Highest score over all pairs.
    pub fn max_score(&self) -> u32 {
        self.graph.edge_weights().copied().max().unwrap_or(0)
    }

    pub fn mean_score(&self) -> f64 {
        if self.graph.edge_count() == 0 {
            return 0.0;
        }
        let total: u64 = self.graph.edge_weights().map(|w| *w as u64).sum();
        total as f64 / self.graph.edge_count() as f64
    }
}
