//! Shared types used across all relmap crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A researcher as delivered by the ingestion layer.
///
/// Every field is a raw string. Multi-valued attributes (`field`, `theme`,
/// `keywords`, `keytechnology`, `program`) stay in their delimited form and are
/// tokenized on demand, so the record itself never changes after loading.
/// Missing fields deserialize to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearcherRecord {
    pub id: String,
    pub name: String,
    pub affiliation: String,
    pub program: String,
    pub theme: String,
    pub field: String,
    pub keywords: String,
    pub keytechnology: String,
}

impl ResearcherRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = affiliation.into();
        self
    }

    /// Set one of the multi-valued attributes.
    pub fn with(mut self, attribute: Attribute, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match attribute {
            Attribute::Field => self.field = raw,
            Attribute::Theme => self.theme = raw,
            Attribute::Keywords => self.keywords = raw,
            Attribute::Keytechnology => self.keytechnology = raw,
            Attribute::Program => self.program = raw,
        }
        self
    }

    /// Raw delimited value of a multi-valued attribute.
    pub fn attribute(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Field => &self.field,
            Attribute::Theme => &self.theme,
            Attribute::Keywords => &self.keywords,
            Attribute::Keytechnology => &self.keytechnology,
            Attribute::Program => &self.program,
        }
    }
}

/// The multi-valued attributes of a researcher record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Research field (e.g. "免疫学関連").
    Field,
    /// Research theme. Tokenized for scoring, matched as free text when filtering.
    Theme,
    Keywords,
    Keytechnology,
    /// Program affiliation. Filterable, never scored.
    Program,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Field,
        Attribute::Theme,
        Attribute::Keywords,
        Attribute::Keytechnology,
        Attribute::Program,
    ];

    /// Attributes that can be constrained by a tag expression.
    pub const FILTERABLE: [Attribute; 4] = [
        Attribute::Field,
        Attribute::Keywords,
        Attribute::Keytechnology,
        Attribute::Program,
    ];

    /// Column name in the source data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Field => "field",
            Attribute::Theme => "theme",
            Attribute::Keywords => "keywords",
            Attribute::Keytechnology => "keytechnology",
            Attribute::Program => "program",
        }
    }

    /// Key used for this attribute in filter criteria.
    ///
    /// Identical to [`Attribute::as_str`] except for keywords, which the
    /// filter surface names in the singular.
    pub fn criteria_key(&self) -> &'static str {
        match self {
            Attribute::Keywords => "keyword",
            other => other.as_str(),
        }
    }

    /// Parse a column name or criteria key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "field" => Some(Attribute::Field),
            "theme" => Some(Attribute::Theme),
            "keyword" | "keywords" => Some(Attribute::Keywords),
            "keytechnology" => Some(Attribute::Keytechnology),
            "program" => Some(Attribute::Program),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored relevance edge: one peer and its score as seen from the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub peer_id: String,
    /// Weighted tag overlap. Always strictly positive.
    pub score: u32,
}

impl Connection {
    pub fn new(peer_id: impl Into<String>, score: u32) -> Self {
        Self {
            peer_id: peer_id.into(),
            score,
        }
    }
}
