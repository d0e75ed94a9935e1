//! Job-Harvest main entry point
//!
//! This is the command-line interface for the Job-Harvest scraper.

use anyhow::Context;
use clap::{Parser, Subcommand};
use job_harvest::config::{load_config_with_hash, Config};
use job_harvest::crawler::Coordinator;
use job_harvest::output::{print_report, CsvSink};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Job-Harvest: scrape a paginated job search into CSV
///
/// Discovers how many result pages a search has, fetches them concurrently
/// and writes one row per job listing.
#[derive(Parser, Debug)]
#[command(name = "job-harvest")]
#[command(version)]
#[command(about = "Scrape a paginated job search into CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape all result pages for a search term and write them to CSV
    Scrape {
        /// Search term; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,

        /// CSV output path (overrides the config file)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Serve the search form and CSV download over HTTP
    Serve {
        /// Socket address to listen on (overrides the config file)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Scrape { term, output } => handle_scrape(config, &term.join(" "), output).await,
        Command::Serve { bind } => handle_serve(config, bind).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("job_harvest=info,warn"),
            1 => EnvFilter::new("job_harvest=debug,info"),
            2 => EnvFilter::new("job_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the `scrape` command
async fn handle_scrape(config: Config, term: &str, output: Option<PathBuf>) -> anyhow::Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(&config.output.csv_path));
    tracing::info!(
        "Failure policy: {:?}, pagination fallback: {:?}",
        config.crawler.failure_policy,
        config.crawler.pagination_fallback
    );

    let coordinator = Coordinator::new(&config)?;
    match coordinator.scrape(term, &CsvSink::new(path)).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the `serve` command
async fn handle_serve(config: Config, bind: Option<String>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let coordinator = Arc::new(Coordinator::new(&config)?);

    job_harvest::server::serve(&bind, coordinator)
        .await
        .with_context(|| format!("Server on {} stopped", bind))
}
