//! Dataset: a loaded record set together with its relevance index.
//!
//! Building a dataset runs the relevance builder exactly once. Everything
//! afterwards (filtering, views, statistics) only reads it, so a dataset can
//! be shared freely between threads. Reloading means building a new dataset.

use crate::error::LoadResult;
use crate::loader::load_records;
use crate::topology::{DegreeEntry, RelevanceGraph};
use relmap_core::filter::{filter_visible, FilterCriteria};
use relmap_core::relevance::{build_graph_with, RelevanceIndex, ScoringWeights};
use relmap_core::types::{Connection, ResearcherRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// Records plus the relevance index built from all of them.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ResearcherRecord>,
    index: RelevanceIndex,
    weights: ScoringWeights,
    /// Id → position of the first record with that id.
    positions: HashMap<String, usize>,
}

/// An edge between two visible researchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleEdge {
    pub source: String,
    pub target: String,
    pub score: u32,
}

/// What a visualization draws for one filter state.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub records: Vec<ResearcherRecord>,
    /// One edge per connected pair of visible researchers, strongest first.
    pub edges: Vec<VisibleEdge>,
}

/// Summary numbers for a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStats {
    /// Distinct researcher ids; the graph-side counts refer to these.
    pub researchers: usize,
    /// Loaded records, including later copies of duplicated ids.
    pub records: usize,
    /// Connected pairs.
    pub edges: usize,
    pub components: usize,
    pub isolated: usize,
    pub max_score: u32,
    pub mean_score: f64,
    pub duplicate_ids: usize,
    pub top_connected: Vec<DegreeEntry>,
}

impl Dataset {
    /// Build a dataset with the default scoring weights.
    pub fn new(records: Vec<ResearcherRecord>) -> Self {
        Self::with_weights(records, ScoringWeights::default())
    }

    pub fn with_weights(records: Vec<ResearcherRecord>, weights: ScoringWeights) -> Self {
        let index = build_graph_with(&records, &weights);
        for id in index.duplicate_ids() {
            warn!(id = %id, "Duplicate researcher id; only the first record is scored");
        }
        debug!(
            researchers = index.len(),
            directed_edges = index.edge_count(),
            "Built relevance index"
        );

        let mut positions = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            positions.entry(record.id.clone()).or_insert(position);
        }

        Self {
            records,
            index,
            weights,
            positions,
        }
    }

    /// Load records from a file and build the dataset.
    pub fn load(path: &Path, weights: ScoringWeights) -> LoadResult<Self> {
        Ok(Self::with_weights(load_records(path)?, weights))
    }

    pub fn records(&self) -> &[ResearcherRecord] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&ResearcherRecord> {
        self.positions.get(id).map(|&position| &self.records[position])
    }

    pub fn index(&self) -> &RelevanceIndex {
        &self.index
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ranked connections of a researcher, over the full record set.
    pub fn connections(&self, id: &str) -> &[Connection] {
        self.index.connections(id)
    }

    /// Records visible under `criteria`.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&ResearcherRecord> {
        filter_visible(&self.records, criteria)
    }

    /// Visible records and the stored edges whose endpoints are both visible.
    ///
    /// Like the index, a view holds each id once, as its first record.
    pub fn view(&self, criteria: &FilterCriteria) -> View {
        let mut visible_ids: HashSet<&str> = HashSet::new();
        let visible: Vec<&ResearcherRecord> = self
            .filter(criteria)
            .into_iter()
            .filter(|record| visible_ids.insert(record.id.as_str()))
            .collect();

        let mut emitted: HashSet<(&str, &str)> = HashSet::new();
        let mut edges = Vec::new();
        for record in &visible {
            let source = record.id.as_str();
            for connection in self.index.connections(source) {
                let target = connection.peer_id.as_str();
                if !visible_ids.contains(target) {
                    continue;
                }
                let pair = if source < target { (source, target) } else { (target, source) };
                if emitted.insert(pair) {
                    edges.push(VisibleEdge {
                        source: source.to_string(),
                        target: target.to_string(),
                        score: connection.score,
                    });
                }
            }
        }
        edges.sort_by(|a, b| b.score.cmp(&a.score));

        View {
            records: visible.into_iter().cloned().collect(),
            edges,
        }
    }

    pub fn stats(&self) -> DatasetStats {
        let graph = RelevanceGraph::from_index(&self.index);
        DatasetStats {
            researchers: self.index.len(),
            records: self.records.len(),
            edges: graph.edge_count(),
            components: graph.connected_components(),
            isolated: graph.isolated().len(),
            max_score: graph.max_score(),
            mean_score: graph.mean_score(),
            duplicate_ids: self.index.duplicate_ids().len(),
            top_connected: graph.degree_ranking(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::sample_records;
    use relmap_core::types::Attribute;

    fn triad() -> Dataset {
        Dataset::new(vec![
            ResearcherRecord::new("1").with(Attribute::Field, "造血器腫瘍学・造血幹細胞・造血発生関連,免疫学関連"),
            ResearcherRecord::new("2").with(Attribute::Field, "免疫学関連"),
            ResearcherRecord::new("3").with(Attribute::Field, "ウイルス学関連"),
        ])
    }

    #[test]
    fn view_without_criteria_has_every_pair_once() {
        let dataset = triad();
        let view = dataset.view(&FilterCriteria::new());
        assert_eq!(view.records.len(), 3);
        assert_eq!(
            view.edges,
            vec![VisibleEdge {
                source: "1".to_string(),
                target: "2".to_string(),
                score: 3,
            }]
        );
    }

    #[test]
    fn view_drops_edges_to_hidden_researchers() {
        let dataset = Dataset::new(sample_records());
        let criteria = FilterCriteria::new().with_affiliation("kumamoto");
        let view = dataset.view(&criteria);

        let ids: Vec<&str> = view.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
        for edge in &view.edges {
            assert!(ids.contains(&edge.source.as_str()));
            assert!(ids.contains(&edge.target.as_str()));
        }
        // Stored connections still reach researchers outside the view.
        assert!(dataset.connections("1").iter().any(|c| c.peer_id == "2"));
    }

    #[test]
    fn view_edges_are_strongest_first() {
        let dataset = Dataset::new(sample_records());
        let view = dataset.view(&FilterCriteria::new());
        assert!(!view.edges.is_empty());
        for pair in view.edges.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn record_lookup_uses_first_occurrence() {
        let dataset = Dataset::new(vec![
            ResearcherRecord::new("1").with_name("first"),
            ResearcherRecord::new("1").with_name("second"),
        ]);
        assert_eq!(dataset.record("1").map(|r| r.name.as_str()), Some("first"));
        assert!(dataset.record("2").is_none());
        assert_eq!(dataset.stats().duplicate_ids, 1);
    }

    #[test]
    fn duplicate_ids_are_counted_once() {
        let dataset = Dataset::new(vec![
            ResearcherRecord::new("1").with_name("first").with(Attribute::Field, "F"),
            ResearcherRecord::new("2").with(Attribute::Field, "F"),
            ResearcherRecord::new("1").with_name("copy").with(Attribute::Field, "F"),
        ]);

        let stats = dataset.stats();
        assert_eq!(stats.researchers, 2);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.edges, 1);
        assert_eq!(stats.isolated, 0);

        let view = dataset.view(&FilterCriteria::new().with_expression(Attribute::Field, "F"));
        let ids: Vec<&str> = view.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(view.records[0].name, "first");
        assert_eq!(view.edges.len(), 1);
    }

    #[test]
    fn stats_summarize_the_graph() {
        let stats = triad().stats();
        assert_eq!(stats.researchers, 3);
        assert_eq!(stats.edges, 1);
        assert_eq!(stats.components, 2);
        assert_eq!(stats.isolated, 1);
        assert_eq!(stats.max_score, 3);
    }
}
