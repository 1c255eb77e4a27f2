//! relmap CLI - Command-line interface for researcher relevance maps.

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use relmap::prelude::*;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "relmap")]
#[command(author, version, about = "relmap - Researcher relevance maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Researcher file to use instead of the configured source (.csv, .tsv, .json)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new relmap project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,

        /// Researcher file to record as the data source
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Show the researchers most relevant to one researcher
    Connections {
        /// Researcher id
        id: String,

        /// Maximum connections to show (default: display.max_connections)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List the researchers matching a filter
    Filter {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// List the tag values available for filtering
    Facets {
        /// Attribute to list (field, keyword, keytechnology, program, theme)
        attribute: Option<String>,

        /// Values to show per attribute
        #[arg(short, long, default_value = "15")]
        top: usize,
    },

    /// Export the visible part of the relevance graph as JSON
    Export {
        /// Output file path
        output: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Show dataset and relevance graph statistics
    Stats,
}

/// Filter options shared by `filter` and `export`.
///
/// Expressions are `A|B` for any of the values, `AND:A|B` for all of them.
#[derive(Args, Debug, Default)]
struct CriteriaArgs {
    /// Research field expression
    #[arg(long)]
    field: Option<String>,

    /// Keyword expression
    #[arg(long)]
    keyword: Option<String>,

    /// Key technology expression
    #[arg(long)]
    keytechnology: Option<String>,

    /// Funding program expression
    #[arg(long)]
    program: Option<String>,

    /// Free text matched against name, theme and affiliation
    #[arg(short, long)]
    text: Option<String>,
}

impl CriteriaArgs {
    fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            field: self.field,
            keyword: self.keyword,
            keytechnology: self.keytechnology,
            program: self.program,
            theme: self.text,
            affiliation: None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let data = cli.data;
    match cli.command {
        Commands::Init { path, source } => commands::init::run(path, source),
        Commands::Connections { id, limit } => commands::connections::run(data, &id, limit),
        Commands::Filter { criteria } => commands::filter::run(data, &criteria.into_criteria()),
        Commands::Facets { attribute, top } => {
            commands::facets::run(data, attribute.as_deref(), top)
        }
        Commands::Export { output, criteria } => {
            commands::export::run(data, &output, &criteria.into_criteria())
        }
        Commands::Stats => commands::stats::run(data),
    }
}
