//! relmap core prelude: convenient imports for common usage.
//!
//! ```rust
//! use relmap_core::prelude::*;
//! ```

pub use crate::types::{Attribute, Connection, ResearcherRecord};

pub use crate::tokenize::{split_tags, tokenize};

pub use crate::predicate::{matches, Expression, AND_MARKER};

pub use crate::relevance::{build_graph, build_graph_with, RelevanceIndex, ScoringWeights};

pub use crate::filter::{filter_visible, CompiledCriteria, FilterCriteria};
