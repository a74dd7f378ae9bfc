//! bizsearch CLI - paginated business search into CSV files
//!
//! Reads credentials from a TOML config file, queries the search endpoint
//! for a term and location (or a whole batch list of them), and writes the
//! flattened results to one CSV file per search.

use anyhow::Context;
use bizsearch::{
    config::{read_batch_pairs, AppConfig},
    CsvFileSink, FusionClient, Paginator, SearchQuery,
};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

const DEFAULT_TERM: &str = "restaurants";
const DEFAULT_LOCATION: &str = "silver spring, md";

#[derive(Parser, Debug)]
#[command(name = "bizsearch")]
#[command(about = "Export business-search results to CSV")]
#[command(version)]
struct Cli {
    /// Search term (falls back to search.search_term in the config file,
    /// then to "restaurants")
    #[arg(short = 'q', long)]
    term: Option<String>,

    /// Search location (falls back to search.zip_code in the config file,
    /// then to "silver spring, md")
    #[arg(short, long)]
    location: Option<String>,

    /// Search radius in meters (API maximum: 40000)
    #[arg(short, long, default_value_t = 10_000)]
    radius: u32,

    /// Path to the TOML config file with creds.api_key
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// File of pipe-delimited `term|location` pairs, one search per line
    /// (header line skipped); writes one CSV per pair
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Output CSV path (single search only; defaults to
    /// `<term>_<location>_<date>.csv`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {e:#}", "❌".red());
        eprintln!("Abort program.");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    let client = FusionClient::new(&config.creds.api_key)?;

    if let Some(batch_path) = &cli.batch {
        let pairs = read_batch_pairs(batch_path)
            .with_context(|| format!("Failed to read batch list {}", batch_path.display()))?;
        log::info!("Batch mode: {} searches from {}", pairs.len(), batch_path.display());

        for (term, location) in pairs {
            run_search(&client, &term, &location, cli.radius, None).await?;
        }
        return Ok(());
    }

    let term = cli
        .term
        .or(config.search.search_term)
        .unwrap_or_else(|| DEFAULT_TERM.to_string());
    let location = cli
        .location
        .or(config.search.zip_code)
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

    run_search(&client, &term, &location, cli.radius, cli.output).await?;
    Ok(())
}

async fn run_search(
    client: &FusionClient,
    term: &str,
    location: &str,
    radius: u32,
    output: Option<PathBuf>,
) -> bizsearch::Result<()> {
    let query = SearchQuery::new(term, location, radius)?;

    let mut sink = match output {
        Some(path) => CsvFileSink::new(path),
        None => CsvFileSink::for_search(term, location),
    };

    let written = Paginator::new(client).run(&query, &mut sink).await?;

    println!(
        "{} Wrote {} rows for {} in {} to {}",
        "✅".green(),
        written.to_string().bold(),
        term.bold(),
        location.bold(),
        sink.path().display()
    );

    Ok(())
}
