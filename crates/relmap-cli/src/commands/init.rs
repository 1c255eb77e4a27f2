//! Initialize a new relmap project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>, source: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing relmap project...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        let mut config = Config::default();
        config.data.source = source.as_deref().map(PathBuf::from);
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    if let Some(source) = source.as_deref() {
        if !base_path.join(Path::new(source)).exists() {
            println!("  {} Source {} does not exist yet", "•".yellow(), source.cyan());
        }
    }

    println!();
    println!("{} relmap project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} relmap stats", "1.".blue());
    println!("  {} relmap filter --field \"免疫学関連\"", "2.".blue());
    println!("  {} relmap connections <id>", "3.".blue());

    Ok(())
}
