//! Facets: the tag values available for each filterable attribute.
//!
//! A filter UI offers these values as choices; an expression built from them
//! is guaranteed to use the same tokens the predicate evaluator compares.

use relmap_core::tokenize::split_tags;
use relmap_core::types::{Attribute, ResearcherRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// One tag value and how many researchers carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// Distinct tags of one attribute, most common first, ties by value.
pub fn facet_values<'a, I>(records: I, attribute: Attribute) -> Vec<FacetValue>
where
    I: IntoIterator<Item = &'a ResearcherRecord>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let distinct: HashSet<String> = split_tags(record.attribute(attribute)).into_iter().collect();
        for tag in distinct {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut values: Vec<FacetValue> = counts
        .into_iter()
        .map(|(value, count)| FacetValue { value, count })
        .collect();
    values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    values
}

/// Facets for every filterable attribute, keyed by criteria key.
pub fn all_facets(records: &[ResearcherRecord]) -> BTreeMap<&'static str, Vec<FacetValue>> {
    Attribute::FILTERABLE
        .into_iter()
        .map(|attribute| (attribute.criteria_key(), facet_values(records, attribute)))
        .collect()
}
