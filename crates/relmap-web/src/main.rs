//! relmap Web - Researcher relevance map server.

use anyhow::{Context, Result};
use clap::Parser;
use relmap::prelude::ScoringWeights;
use relmap_web::{routes, AppState};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "relmap-web")]
#[command(about = "relmap Web - Researcher relevance map server")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Researcher file (.csv, .tsv, .json); serves the built-in sample when omitted
    #[arg(short, long)]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);

    let state = AppState::new(cli.data.clone(), ScoringWeights::default())
        .context("Failed to load researchers")?;

    println!("Starting relmap Web...");
    match &cli.data {
        Some(path) => println!("Serving {}", path.display()),
        None => println!("Serving the built-in sample researchers"),
    }
    println!("Open http://{} in your browser", addr);

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
