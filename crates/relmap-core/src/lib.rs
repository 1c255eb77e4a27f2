//! # relmap core
//!
//! Relevance scoring and filter matching for researcher relevance maps.
//!
//! Researchers carry multi-valued attributes stored as delimited strings
//! (research field, theme, keywords, key technologies, program). This crate
//! holds the parts of the system with exact, reproducible semantics:
//!
//! - **Tokenizer** ([`tokenize`]) splits an attribute into tags.
//! - **Predicate evaluator** ([`predicate`]) matches AND/OR tag expressions.
//! - **Relevance graph builder** ([`relevance`]) scores every researcher pair
//!   by weighted tag overlap and ranks each researcher's peers.
//! - **Record filter** ([`filter`]) narrows the record set for display.
//!
//! The two phases are kept apart on purpose: the graph is built once per
//! record set, filtering runs on every change of filter state and never
//! rescores.
//!
//! ```rust
//! use relmap_core::prelude::*;
//!
//! let records = vec![
//!     ResearcherRecord::new("1").with(Attribute::Field, "造血器腫瘍学・造血幹細胞・造血発生関連,免疫学関連"),
//!     ResearcherRecord::new("2").with(Attribute::Field, "免疫学関連"),
//!     ResearcherRecord::new("3").with(Attribute::Field, "ウイルス学関連"),
//! ];
//!
//! let index = build_graph(&records);
//! assert_eq!(index.score("1", "2"), Some(3));
//! assert!(index.connections("3").is_empty());
//!
//! let criteria = FilterCriteria::new().with_expression(Attribute::Field, "免疫学関連");
//! let visible = filter_visible(&records, &criteria);
//! assert_eq!(visible.len(), 2);
//! ```

pub mod filter;
pub mod predicate;
pub mod prelude;
pub mod relevance;
pub mod tokenize;
pub mod types;
