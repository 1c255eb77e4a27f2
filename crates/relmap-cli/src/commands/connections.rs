//! Show the ranked connections of one researcher.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::PathBuf;

use super::{label, load_dataset};
use crate::config::Config;

pub fn run(data: Option<PathBuf>, id: &str, limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let dataset = load_dataset(data, &config)?;

    let Some(record) = dataset.record(id) else {
        bail!("No researcher with id {}", id.cyan());
    };

    println!("{} {}", "→".blue(), label(record).white().bold());
    if !record.affiliation.is_empty() {
        println!("  {}", record.affiliation.dimmed());
    }
    println!();

    let connections = dataset.connections(id);
    if connections.is_empty() {
        println!("{} No related researchers", "•".yellow());
        return Ok(());
    }

    let limit = limit.unwrap_or(config.display.max_connections);
    for (i, connection) in connections.iter().take(limit).enumerate() {
        let rank = format!("{}.", i + 1);
        let peer = dataset
            .record(&connection.peer_id)
            .map(label)
            .unwrap_or_else(|| connection.peer_id.clone());
        println!(
            "  {} {} {}",
            rank.blue(),
            peer.white().bold(),
            format!("(score {})", connection.score).dimmed()
        );
        if let Some(peer) = dataset.record(&connection.peer_id) {
            if !peer.affiliation.is_empty() {
                println!("      {}", peer.affiliation);
            }
        }
    }

    println!();
    println!(
        "{} {} of {} connections",
        "✓".green(),
        connections.len().min(limit).to_string().cyan(),
        connections.len().to_string().cyan()
    );

    Ok(())
}
