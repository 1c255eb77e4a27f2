//! CLI command implementations.

pub mod connections;
pub mod export;
pub mod facets;
pub mod filter;
pub mod init;
pub mod stats;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use relmap::prelude::*;
use std::path::PathBuf;

use crate::config::Config;

/// Load the dataset from `--data`, or else from the configured source.
pub fn load_dataset(data: Option<PathBuf>, config: &Config) -> Result<Dataset> {
    let Some(source) = data.or_else(|| config.data.source.clone()) else {
        bail!(
            "No data source. Pass {} or run {} first.",
            "--data <file>".cyan(),
            "relmap init --source <file>".cyan()
        );
    };

    Dataset::load(&source, config.scoring)
        .with_context(|| format!("Failed to load researchers from {}", source.display()))
}

/// One-line label for a researcher: name (id), or the id alone.
pub fn label(record: &ResearcherRecord) -> String {
    if record.name.is_empty() {
        record.id.clone()
    } else {
        format!("{} ({})", record.name, record.id)
    }
}
