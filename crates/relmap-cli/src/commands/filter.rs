//! List the researchers visible under a filter.

use anyhow::Result;
use colored::Colorize;
use relmap::prelude::*;
use std::path::PathBuf;

use super::{label, load_dataset};
use crate::config::Config;

pub fn run(data: Option<PathBuf>, criteria: &FilterCriteria) -> Result<()> {
    let config = Config::load()?;
    let dataset = load_dataset(data, &config)?;
    let view = dataset.view(criteria);

    if view.records.is_empty() {
        println!("{} No researchers match", "•".yellow());
        return Ok(());
    }

    for record in &view.records {
        let mut details = Vec::new();
        if !record.affiliation.is_empty() {
            details.push(record.affiliation.as_str());
        }
        if !record.program.is_empty() {
            details.push(record.program.as_str());
        }
        println!(
            "  {} {} {}",
            "•".blue(),
            label(record).white().bold(),
            details.join(" / ").dimmed()
        );
    }

    println!();
    println!(
        "{} {} of {} researchers visible, {} connections among them",
        "✓".green(),
        view.records.len().to_string().cyan(),
        dataset.index().len().to_string().cyan(),
        view.edges.len().to_string().cyan()
    );

    Ok(())
}
