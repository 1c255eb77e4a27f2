//! Relevance graph builder.
//!
//! Scores every ordered pair of researchers by weighted tag overlap and keeps,
//! for each researcher, the peers with a positive score ranked best first.
//!
//! | attribute       | weight per shared tag |
//! |-----------------|-----------------------|
//! | `field`         | 3 |
//! | `theme`         | 2 |
//! | `keywords`      | 1 |
//! | `keytechnology` | 1 |
//!
//! `program` is never scored: sharing a funding program is not evidence of
//! research relevance.
//!
//! Each record's tags are deduplicated per attribute before scoring, so a tag
//! repeated inside one attribute counts once and the score of A→B always
//! equals the score of B→A.
//!
//! The build is O(n² · m) and meant for corpora of a few hundred researchers.
//! It runs once per loaded record set; filtering never touches the result.

use crate::tokenize::split_tags;
use crate::types::{Attribute, Connection, ResearcherRecord};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Attributes that contribute to a relevance score, in scoring order.
pub const SCORED_ATTRIBUTES: [Attribute; 4] = [
    Attribute::Field,
    Attribute::Theme,
    Attribute::Keywords,
    Attribute::Keytechnology,
];

/// Weight added per shared tag, by attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub field: u32,
    pub theme: u32,
    pub keywords: u32,
    pub keytechnology: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            field: 3,
            theme: 2,
            keywords: 1,
            keytechnology: 1,
        }
    }
}

impl ScoringWeights {
    /// Weight for an attribute. Program is always 0.
    pub fn weight(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Field => self.field,
            Attribute::Theme => self.theme,
            Attribute::Keywords => self.keywords,
            Attribute::Keytechnology => self.keytechnology,
            Attribute::Program => 0,
        }
    }
}

/// Ranked relevance lists for a record set, keyed by researcher id.
///
/// Built by [`build_graph`]; never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelevanceIndex {
    /// Researcher ids in record order (first occurrence of each id).
    order: Vec<String>,
    connections: HashMap<String, Vec<Connection>>,
    /// Ids that appeared more than once; later copies were ignored.
    duplicate_ids: Vec<String>,
}

impl RelevanceIndex {
    /// Ranked connections of a researcher. Unknown ids have none.
    pub fn connections(&self, id: &str) -> &[Connection] {
        self.connections
            .get(id)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.connections.contains_key(id)
    }

    /// Score from `id` to `peer_id`, if they are connected.
    pub fn score(&self, id: &str, peer_id: &str) -> Option<u32> {
        self.connections(id)
            .iter()
            .find(|c| c.peer_id == peer_id)
            .map(|c| c.score)
    }

    /// Iterate `(id, connections)` in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Connection])> {
        self.order
            .iter()
            .map(move |id| (id.as_str(), self.connections(id)))
    }

    /// Number of indexed researchers.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total stored (directed) edges.
    pub fn edge_count(&self) -> usize {
        self.connections.values().map(Vec::len).sum()
    }

    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicate_ids
    }
}

/// Deduplicated tag sets of one record, one per scored attribute.
struct TagProfile {
    tags: [HashSet<String>; 4],
}

impl TagProfile {
    fn of(record: &ResearcherRecord) -> Self {
        Self {
            tags: SCORED_ATTRIBUTES.map(|attribute| {
                split_tags(record.attribute(attribute)).into_iter().collect()
            }),
        }
    }

    fn score_against(&self, other: &TagProfile, weights: &[u32; 4]) -> u32 {
        self.tags
            .iter()
            .zip(other.tags.iter())
            .zip(weights.iter())
            .filter(|(_, weight)| **weight > 0)
            .map(|((mine, theirs), weight)| {
                let shared = mine.iter().filter(|tag| theirs.contains(*tag)).count();
                u32::try_from(shared).unwrap_or(u32::MAX).saturating_mul(*weight)
            })
            .fold(0, u32::saturating_add)
    }
}

/// Build the relevance index with the default weights.
pub fn build_graph(records: &[ResearcherRecord]) -> RelevanceIndex {
    build_graph_with(records, &ScoringWeights::default())
}

/// Build the relevance index for a full record set.
///
/// Every record gets an entry, possibly empty. Peers appear in record order
/// before ranking, and the ranking is a stable sort, so equal scores keep
/// record order. Records repeating an earlier id are skipped entirely.
pub fn build_graph_with(records: &[ResearcherRecord], weights: &ScoringWeights) -> RelevanceIndex {
    let mut seen = HashSet::new();
    let mut duplicate_ids = Vec::new();
    let mut unique: Vec<&ResearcherRecord> = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(record.id.as_str()) {
            unique.push(record);
        } else if !duplicate_ids.contains(&record.id) {
            duplicate_ids.push(record.id.clone());
        }
    }

    let weights = SCORED_ATTRIBUTES.map(|attribute| weights.weight(attribute));
    let profiles: Vec<TagProfile> = unique.iter().map(|r| TagProfile::of(r)).collect();
    let mut lists: Vec<Vec<Connection>> = vec![Vec::new(); unique.len()];

    // Scores are symmetric, so each unordered pair is scored once. Walking i
    // upward still appends every list's peers in record order.
    for i in 0..unique.len() {
        for j in (i + 1)..unique.len() {
            let score = profiles[i].score_against(&profiles[j], &weights);
            if score > 0 {
                lists[i].push(Connection::new(unique[j].id.clone(), score));
                lists[j].push(Connection::new(unique[i].id.clone(), score));
            }
        }
    }

    let mut connections = HashMap::with_capacity(unique.len());
    let mut order = Vec::with_capacity(unique.len());
    for (record, mut list) in unique.into_iter().zip(lists) {
        list.sort_by(|a, b| b.score.cmp(&a.score));
        order.push(record.id.clone());
        connections.insert(record.id.clone(), list);
    }

    RelevanceIndex {
        order,
        connections,
        duplicate_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ResearcherRecord {
        ResearcherRecord::new(id)
    }

    #[test]
    fn shared_field_tag_scores_three() {
        let records = vec![
            record("a").with(Attribute::Field, "Immunology"),
            record("b").with(Attribute::Field, "Immunology"),
        ];
        let index = build_graph(&records);
        assert_eq!(index.score("a", "b"), Some(3));
        assert_eq!(index.score("b", "a"), Some(3));
    }

    #[test]
    fn field_and_keyword_overlap_scores_four() {
        let records = vec![
            record("a")
                .with(Attribute::Field, "Immunology")
                .with(Attribute::Keywords, "T cell, cytokine"),
            record("b")
                .with(Attribute::Field, "Immunology, Virology")
                .with(Attribute::Keywords, "T cell"),
        ];
        let index = build_graph(&records);
        assert_eq!(index.score("a", "b"), Some(4));
    }

    #[test]
    fn theme_and_technology_weights() {
        let records = vec![
            record("a")
                .with(Attribute::Theme, "aging、inflammation")
                .with(Attribute::Keytechnology, "scRNA-seq"),
            record("b")
                .with(Attribute::Theme, "inflammation")
                .with(Attribute::Keytechnology, "scRNA-seq"),
        ];
        let index = build_graph(&records);
        assert_eq!(index.score("a", "b"), Some(3));
    }

    #[test]
    fn large_weights_saturate_instead_of_overflowing() {
        let weights = ScoringWeights {
            field: u32::MAX / 2 + 1,
            ..ScoringWeights::default()
        };
        let records = vec![
            record("a").with(Attribute::Field, "F, G").with(Attribute::Keywords, "k"),
            record("b").with(Attribute::Field, "F, G").with(Attribute::Keywords, "k"),
            record("c").with(Attribute::Keywords, "k"),
        ];
        let index = build_graph_with(&records, &weights);
        assert_eq!(index.score("a", "b"), Some(u32::MAX));
        assert_eq!(index.score("a", "c"), Some(1));
        assert_eq!(index.connections("a")[0], Connection::new("b", u32::MAX));
    }

    #[test]
    fn program_overlap_is_not_relevance() {
        let records = vec![
            record("a").with(Attribute::Program, "Moonshot"),
            record("b").with(Attribute::Program, "Moonshot"),
        ];
        let index = build_graph(&records);
        assert!(index.connections("a").is_empty());
        assert!(index.connections("b").is_empty());
        assert_eq!(index.edge_count(), 0);
    }

    #[test]
    fn repeated_tags_count_once() {
        let records = vec![
            record("a").with(Attribute::Keywords, "X,X,Y"),
            record("b").with(Attribute::Keywords, "X"),
        ];
        let index = build_graph(&records);
        assert_eq!(index.score("a", "b"), Some(1));
        assert_eq!(index.score("b", "a"), Some(1));
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let records = vec![
            record("hub")
                .with(Attribute::Field, "F")
                .with(Attribute::Keywords, "k1, k2"),
            record("one-keyword").with(Attribute::Keywords, "k1"),
            record("field").with(Attribute::Field, "F"),
            record("other-keyword").with(Attribute::Keywords, "k2"),
            record("field-and-keyword")
                .with(Attribute::Field, "F")
                .with(Attribute::Keywords, "k2"),
        ];
        let index = build_graph(&records);
        let peers: Vec<(&str, u32)> = index
            .connections("hub")
            .iter()
            .map(|c| (c.peer_id.as_str(), c.score))
            .collect();
        assert_eq!(
            peers,
            vec![
                ("field-and-keyword", 4),
                ("field", 3),
                ("one-keyword", 1),
                ("other-keyword", 1),
            ]
        );
    }

    #[test]
    fn duplicate_ids_are_reported_and_skipped() {
        let records = vec![
            record("a").with(Attribute::Field, "F"),
            record("b").with(Attribute::Field, "F"),
            record("a").with(Attribute::Field, "F"),
        ];
        let index = build_graph(&records);
        assert_eq!(index.len(), 2);
        assert_eq!(index.duplicate_ids(), ["a".to_string()]);
        assert_eq!(index.connections("b").len(), 1);
        assert!(index.connections("a").iter().all(|c| c.peer_id != "a"));
    }

    #[test]
    fn custom_weights_apply() {
        let weights = ScoringWeights {
            field: 10,
            ..ScoringWeights::default()
        };
        let records = vec![
            record("a").with(Attribute::Field, "F"),
            record("b").with(Attribute::Field, "F"),
        ];
        let index = build_graph_with(&records, &weights);
        assert_eq!(index.score("a", "b"), Some(10));
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = build_graph(&[]);
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
