//! # relmap
//!
//! Researcher relevance maps from multi-valued research attributes.
//!
//! Every researcher carries a handful of free-text attributes (research
//! field, theme, keywords, key technologies, funding program). relmap splits
//! them into tags, scores every pair of researchers by the tags they share,
//! and keeps a ranked list of related researchers for each one. A filter
//! narrows the visible set without ever touching those lists.
//!
//! ## Quick Start
//!
//! ```rust
//! use relmap::prelude::*;
//!
//! let dataset = Dataset::new(vec![
//!     ResearcherRecord::new("1").with(Attribute::Field, "造血器腫瘍学・造血幹細胞・造血発生関連,免疫学関連"),
//!     ResearcherRecord::new("2").with(Attribute::Field, "免疫学関連"),
//!     ResearcherRecord::new("3").with(Attribute::Field, "ウイルス学関連"),
//! ]);
//!
//! // One shared field tag, weighted 3.
//! assert_eq!(dataset.connections("1"), [Connection::new("2", 3)]);
//!
//! // Filtering only changes what is visible.
//! let criteria = FilterCriteria::new().with_expression(Attribute::Field, "AND:免疫学関連|ウイルス学関連");
//! assert!(dataset.filter(&criteria).is_empty());
//! assert_eq!(dataset.connections("2"), [Connection::new("1", 3)]);
//! ```
//!
//! ## Architecture
//!
//! - [`relmap_core`] - Tokenizer, predicate evaluator, relevance builder, record filter
//! - [`relmap_runtime`] - Loading, datasets and views, facets, graph statistics, export
//!
//! ## Scoring
//!
//! | Attribute | Weight per shared tag |
//! |-----------|-----------------------|
//! | field | 3 |
//! | theme | 2 |
//! | keywords | 1 |
//! | keytechnology | 1 |
//! | program | 0 (filter only) |
//!
//! ## Filter expressions
//!
//! - `A|B` matches records tagged with A or B
//! - `AND:A|B` matches records tagged with both
//! - an empty expression matches everything

pub use relmap_core as core;
pub use relmap_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use relmap::prelude::*;
/// ```
pub mod prelude {
    pub use relmap_core::prelude::*;

    // Runtime
    pub use relmap_runtime::dataset::{Dataset, DatasetStats, View, VisibleEdge};
    pub use relmap_runtime::error::{LoadError, LoadResult};
    pub use relmap_runtime::export::{export_view, ExportedGraph, ExportedNode};
    pub use relmap_runtime::facets::{all_facets, facet_values, FacetValue};
    pub use relmap_runtime::loader::{load_records, sample_records};
    pub use relmap_runtime::topology::{DegreeEntry, RelevanceGraph};
}

/// Version of the relmap crates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
