//! List filter values per attribute.

use anyhow::{bail, Result};
use colored::Colorize;
use relmap::prelude::*;
use std::path::PathBuf;

use super::load_dataset;
use crate::config::Config;

pub fn run(data: Option<PathBuf>, attribute: Option<&str>, top: usize) -> Result<()> {
    let config = Config::load()?;
    let dataset = load_dataset(data, &config)?;

    let attributes: Vec<Attribute> = match attribute {
        Some(name) => match Attribute::from_name(name) {
            Some(attribute) => vec![attribute],
            None => bail!("Unknown attribute: {}", name.cyan()),
        },
        None => Attribute::FILTERABLE.to_vec(),
    };

    for attribute in attributes {
        let values = facet_values(dataset.records(), attribute);
        println!(
            "{} {}",
            attribute.criteria_key().blue().bold(),
            format!("({} values)", values.len()).dimmed()
        );
        for facet in values.iter().take(top) {
            println!("  {:>4}  {}", facet.count.to_string().cyan(), facet.value);
        }
        if values.len() > top {
            println!("  {}", format!("... {} more", values.len() - top).dimmed());
        }
        println!();
    }

    Ok(())
}
