//! Record filter: narrows a record set to the researchers matching the
//! current filter state.
//!
//! A record is visible when it passes every active check:
//!
//! 1. the free-text query (from `theme`, else `affiliation`) is a
//!    case-insensitive substring of its name, theme, or affiliation;
//! 2. each tag expression on `field`, `keyword`, `keytechnology` and
//!    `program` matches the corresponding attribute.
//!
//! Filtering only reads records; the relevance index is left alone.

use crate::predicate::Expression;
use crate::types::{Attribute, ResearcherRecord};
use serde::{Deserialize, Serialize};

/// Filter state as sent by a filter UI.
///
/// Absent keys impose no constraint. `theme` and `affiliation` are two inputs
/// for one free-text query matched against name, theme and affiliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Expression over the record's `keywords` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keytechnology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expression for a filterable attribute.
    ///
    /// Theme is not an expression target; setting it stores a free-text query.
    pub fn with_expression(mut self, attribute: Attribute, expression: impl Into<String>) -> Self {
        let expression = Some(expression.into());
        match attribute {
            Attribute::Field => self.field = expression,
            Attribute::Keywords => self.keyword = expression,
            Attribute::Keytechnology => self.keytechnology = expression,
            Attribute::Program => self.program = expression,
            Attribute::Theme => self.theme = expression,
        }
        self
    }

    pub fn with_text(mut self, query: impl Into<String>) -> Self {
        self.theme = Some(query.into());
        self
    }

    pub fn with_affiliation(mut self, query: impl Into<String>) -> Self {
        self.affiliation = Some(query.into());
        self
    }

    /// Expression string stored for a filterable attribute.
    pub fn expression(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Field => self.field.as_deref(),
            Attribute::Keywords => self.keyword.as_deref(),
            Attribute::Keytechnology => self.keytechnology.as_deref(),
            Attribute::Program => self.program.as_deref(),
            Attribute::Theme => None,
        }
    }

    /// True when no key is defined at all.
    pub fn is_empty(&self) -> bool {
        self.field.is_none()
            && self.keyword.is_none()
            && self.keytechnology.is_none()
            && self.program.is_none()
            && self.theme.is_none()
            && self.affiliation.is_none()
    }

    /// The shared free-text query, if any input carries text.
    pub fn text_query(&self) -> Option<&str> {
        [self.theme.as_deref(), self.affiliation.as_deref()]
            .into_iter()
            .flatten()
            .find(|query| !query.is_empty())
    }

    /// Parse the criteria once for evaluation over many records.
    pub fn compile(&self) -> CompiledCriteria {
        let checks = Attribute::FILTERABLE
            .into_iter()
            .filter_map(|attribute| {
                self.expression(attribute)
                    .filter(|expression| !expression.is_empty())
                    .map(|expression| (attribute, Expression::parse(expression)))
            })
            .collect();

        CompiledCriteria {
            text: self.text_query().map(str::to_lowercase),
            checks,
        }
    }

    /// Whether a single record passes these criteria.
    pub fn matches(&self, record: &ResearcherRecord) -> bool {
        self.compile().matches(record)
    }
}

/// Criteria with expressions parsed and the text query lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCriteria {
    text: Option<String>,
    checks: Vec<(Attribute, Expression)>,
}

impl CompiledCriteria {
    /// True when nothing would be filtered out.
    pub fn is_unconstrained(&self) -> bool {
        self.text.is_none() && self.checks.is_empty()
    }

    pub fn matches(&self, record: &ResearcherRecord) -> bool {
        if let Some(query) = &self.text {
            let hit = [&record.name, &record.theme, &record.affiliation]
                .iter()
                .any(|value| value.to_lowercase().contains(query.as_str()));
            if !hit {
                return false;
            }
        }

        self.checks
            .iter()
            .all(|(attribute, expression)| expression.matches_raw(Some(record.attribute(*attribute))))
    }
}

/// Return the records visible under `criteria`, in input order.
///
/// With no defined criteria every record is returned.
pub fn filter_visible<'a>(
    records: &'a [ResearcherRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a ResearcherRecord> {
    if criteria.is_empty() {
        return records.iter().collect();
    }

    let compiled = criteria.compile();
    records.iter().filter(|record| compiled.matches(record)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ResearcherRecord> {
        vec![
            ResearcherRecord::new("1")
                .with_name("Aiko Tanaka")
                .with_affiliation("Kumamoto Univ.")
                .with(Attribute::Field, "Immunology, Virology")
                .with(Attribute::Keywords, "T cell、cytokine")
                .with(Attribute::Program, "Moonshot"),
            ResearcherRecord::new("2")
                .with_name("Ken Mori")
                .with_affiliation("Kyoto Univ.")
                .with(Attribute::Field, "Immunology")
                .with(Attribute::Theme, "Chronic inflammation"),
            ResearcherRecord::new("3")
                .with_name("Yui Sato")
                .with_affiliation("Osaka Univ.")
                .with(Attribute::Field, "Virology")
                .with(Attribute::Keytechnology, "Cryo-EM"),
        ]
    }

    fn ids(records: &[&ResearcherRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn empty_criteria_pass_everything_through() {
        let records = sample();
        let visible = filter_visible(&records, &FilterCriteria::new());
        assert_eq!(visible.len(), records.len());
        for (kept, original) in visible.iter().zip(records.iter()) {
            assert!(std::ptr::eq(*kept, original));
        }
    }

    #[test]
    fn affiliation_query_is_case_insensitive_substring() {
        let records = sample();
        let criteria = FilterCriteria::new().with_affiliation("kuma");
        assert_eq!(ids(&filter_visible(&records, &criteria)), vec!["1"]);
    }

    #[test]
    fn text_query_searches_name_and_theme() {
        let records = sample();
        assert_eq!(
            ids(&filter_visible(&records, &FilterCriteria::new().with_text("INFLAMM"))),
            vec!["2"]
        );
        assert_eq!(
            ids(&filter_visible(&records, &FilterCriteria::new().with_text("sato"))),
            vec!["3"]
        );
    }

    #[test]
    fn theme_query_wins_over_affiliation() {
        let criteria = FilterCriteria::new().with_text("mori").with_affiliation("kuma");
        assert_eq!(criteria.text_query(), Some("mori"));
        let empty_theme = FilterCriteria::new().with_text("").with_affiliation("kuma");
        assert_eq!(empty_theme.text_query(), Some("kuma"));
    }

    #[test]
    fn blank_query_is_skipped() {
        let records = sample();
        let criteria = FilterCriteria::new().with_text("").with_affiliation("");
        assert!(criteria.compile().is_unconstrained());
        assert_eq!(filter_visible(&records, &criteria).len(), 3);
    }

    #[test]
    fn attribute_checks_combine_with_and() {
        let records = sample();
        let criteria = FilterCriteria::new()
            .with_expression(Attribute::Field, "Immunology")
            .with_expression(Attribute::Program, "Moonshot");
        assert_eq!(ids(&filter_visible(&records, &criteria)), vec!["1"]);
    }

    #[test]
    fn or_and_and_expressions_on_one_attribute() {
        let records = sample();
        let any = FilterCriteria::new().with_expression(Attribute::Field, "Virology|Chemistry");
        assert_eq!(ids(&filter_visible(&records, &any)), vec!["1", "3"]);

        let all = FilterCriteria::new().with_expression(Attribute::Field, "AND:Immunology|Virology");
        assert_eq!(ids(&filter_visible(&records, &all)), vec!["1"]);
    }

    #[test]
    fn keyword_criterion_targets_keywords_attribute() {
        let records = sample();
        let criteria = FilterCriteria::new().with_expression(Attribute::Keywords, "cytokine");
        assert_eq!(criteria.keyword.as_deref(), Some("cytokine"));
        assert_eq!(ids(&filter_visible(&records, &criteria)), vec!["1"]);
    }

    #[test]
    fn record_without_attribute_fails_constraint() {
        let records = sample();
        let criteria = FilterCriteria::new().with_expression(Attribute::Keytechnology, "Cryo-EM|NMR");
        assert_eq!(ids(&filter_visible(&records, &criteria)), vec!["3"]);
    }

    #[test]
    fn text_and_attribute_checks_both_apply() {
        let records = sample();
        let criteria = FilterCriteria::new()
            .with_affiliation("univ")
            .with_expression(Attribute::Field, "Immunology");
        assert_eq!(ids(&filter_visible(&records, &criteria)), vec!["1", "2"]);
    }

    #[test]
    fn theme_filters_as_whole_text_but_scores_as_tags() {
        use crate::relevance::build_graph;

        let records = vec![
            ResearcherRecord::new("a").with(Attribute::Theme, "慢性炎症, 老化"),
            ResearcherRecord::new("b").with(Attribute::Theme, "老化"),
            ResearcherRecord::new("c").with(Attribute::Theme, "慢性炎症"),
        ];

        // The query crosses the delimiter, so it only matches the raw text.
        let criteria = FilterCriteria::new().with_text("炎症, 老");
        assert_eq!(ids(&filter_visible(&records, &criteria)), vec!["a"]);

        let index = build_graph(&records);
        assert_eq!(index.score("a", "b"), Some(2));
        assert_eq!(index.score("a", "c"), Some(2));
        assert_eq!(index.score("b", "c"), None);
    }

    #[test]
    fn criteria_deserialize_from_partial_json() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"field": "AND:A|B", "affiliation": "kuma"}"#).unwrap();
        assert_eq!(criteria.field.as_deref(), Some("AND:A|B"));
        assert_eq!(criteria.keyword, None);
        assert_eq!(criteria.text_query(), Some("kuma"));
    }
}
