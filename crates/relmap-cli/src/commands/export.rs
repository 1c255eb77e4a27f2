//! Export the visible relevance graph.

use anyhow::{Context, Result};
use colored::Colorize;
use relmap::prelude::*;
use std::path::{Path, PathBuf};

use super::load_dataset;
use crate::config::Config;

pub fn run(data: Option<PathBuf>, output: &str, criteria: &FilterCriteria) -> Result<()> {
    let config = Config::load()?;
    println!("{} Loading researchers...", "→".blue());
    let dataset = load_dataset(data, &config)?;

    let export = export_view(&dataset, criteria);
    let content = export.to_json_pretty().context("Failed to serialize export")?;
    let output_path = Path::new(output);
    std::fs::write(output_path, content)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!();
    println!("{} Exported to {}", "✓".green().bold(), output.cyan());
    println!("  Nodes: {}", export.metadata.node_count.to_string().cyan());
    println!("  Edges: {}", export.metadata.edge_count.to_string().cyan());

    Ok(())
}
