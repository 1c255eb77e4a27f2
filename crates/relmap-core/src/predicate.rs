//! Predicate evaluator for tag expressions.
//!
//! An expression is a `|`-separated list of tag values. By default it is an
//! OR-list: a record matches when any value is one of its tags. Prefixed with
//! [`AND_MARKER`] it becomes an AND-list: every value must be present.
//!
//! ```rust
//! use relmap_core::predicate::matches;
//!
//! assert!(matches(Some("X, Y, Z"), "AND:X|Y"));
//! assert!(!matches(Some("X, Y, Z"), "AND:X|W"));
//! assert!(matches(Some("X, Y"), "X|W"));
//! ```
//!
//! Matching is exact string equality on tokens. Substring search belongs to
//! the free-text path of the record filter.

use crate::tokenize::split_tags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix that turns an expression into an AND-list.
pub const AND_MARKER: &str = "AND:";

/// Separator between values in an expression.
pub const VALUE_SEPARATOR: char = '|';

/// A parsed tag expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "values", rename_all = "lowercase")]
pub enum Expression {
    /// Every value must be a tag of the record.
    All(Vec<String>),
    /// At least one value must be a tag of the record.
    Any(Vec<String>),
}

impl Expression {
    /// Parse an expression string. Values are taken verbatim between separators.
    pub fn parse(expression: &str) -> Self {
        match expression.strip_prefix(AND_MARKER) {
            Some(rest) => Expression::All(split_values(rest)),
            None => Expression::Any(split_values(expression)),
        }
    }

    pub fn all<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression::All(values.into_iter().map(Into::into).collect())
    }

    pub fn any<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression::Any(values.into_iter().map(Into::into).collect())
    }

    pub fn values(&self) -> &[String] {
        match self {
            Expression::All(values) | Expression::Any(values) => values,
        }
    }

    /// Evaluate against an already tokenized tag list.
    pub fn matches_tags<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        let present = |value: &String| tags.iter().any(|tag| tag.as_ref() == value.as_str());
        match self {
            Expression::All(required) => required.iter().all(present),
            Expression::Any(allowed) => allowed.iter().any(present),
        }
    }

    /// Evaluate against a raw attribute value.
    ///
    /// A record without the attribute cannot satisfy a positive constraint,
    /// so an empty or missing value never matches.
    pub fn matches_raw(&self, raw: Option<&str>) -> bool {
        match raw {
            Some(raw) if !raw.is_empty() => self.matches_tags(&split_tags(raw)),
            _ => false,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.values().join("|");
        match self {
            Expression::All(_) => write!(f, "{}{}", AND_MARKER, joined),
            Expression::Any(_) => f.write_str(&joined),
        }
    }
}

fn split_values(list: &str) -> Vec<String> {
    list.split(VALUE_SEPARATOR).map(str::to_string).collect()
}

/// Decide whether a raw attribute value satisfies an expression string.
///
/// An empty expression imposes no constraint. Callers holding optional
/// criteria normally skip absent expressions before getting here.
pub fn matches(raw: Option<&str>, expression: &str) -> bool {
    if expression.is_empty() {
        return true;
    }
    Expression::parse(expression).matches_raw(raw)
}
