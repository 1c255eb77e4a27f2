//! Show dataset statistics.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use super::load_dataset;
use crate::config::Config;

pub fn run(data: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let dataset = load_dataset(data, &config)?;
    let stats = dataset.stats();

    println!("{}", "relmap Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Researchers".blue().bold());
    println!("  Total:             {}", stats.researchers.to_string().cyan());
    println!("  Without relations: {}", stats.isolated.to_string().cyan());
    if stats.duplicate_ids > 0 {
        println!("  Records loaded:    {}", stats.records.to_string().cyan());
        println!("  Duplicate ids:     {}", stats.duplicate_ids.to_string().yellow());
    }
    println!();

    println!("{}", "Relevance Graph".blue().bold());
    println!("  Connected pairs:   {}", stats.edges.to_string().cyan());
    println!("  Components:        {}", stats.components.to_string().cyan());
    println!("  Max score:         {}", stats.max_score.to_string().cyan());
    println!("  Mean score:        {:.2}", stats.mean_score);
    println!();

    if stats.researchers > 1 {
        let max_edges = (stats.researchers * (stats.researchers - 1)) / 2;
        let density = stats.edges as f64 / max_edges as f64;
        println!("{}", "Density".blue().bold());
        println!("  Graph density:     {:.4}", density);
        println!();
    }

    if !stats.top_connected.is_empty() {
        println!("{}", "Most Connected".blue().bold());
        for (i, entry) in stats.top_connected.iter().enumerate() {
            let name = dataset
                .record(&entry.id)
                .map(super::label)
                .unwrap_or_else(|| entry.id.clone());
            println!(
                "  {} {} {}",
                format!("{}.", i + 1).blue(),
                name,
                format!("({} peers, strength {})", entry.degree, entry.strength).dimmed()
            );
        }
        println!();
    }

    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
