//! # relmap runtime
//!
//! Everything around the core algorithms that a running system needs:
//! loading record sets, holding a dataset with its relevance index, cutting
//! visible views for a filter state, and summarizing the graph.
//!
//! A [`dataset::Dataset`] is built once per loaded record set and then only
//! read, so filter changes are cheap and never rescore.

pub mod dataset;
pub mod error;
pub mod export;
pub mod facets;
pub mod loader;
pub mod topology;
