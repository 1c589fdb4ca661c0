// src/main.rs
mod utils;
mod naia;
mod extractors;
mod storage;

use std::path::PathBuf;

use clap::Parser;
use naia::{ProcessedUrls, ScrapeOutcome, StandingsScraper};
use storage::{ProcessedUrlStore, StandingsTable};
use utils::AppError;

/// Command Line Interface for the NAIA conference standings scraper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Standings page to scrape
    #[arg(short, long, env = "NAIA_START_URL")]
    url: Option<String>,

    /// Parse a saved HTML page instead of fetching one (takes precedence over --url)
    #[arg(long)]
    html_file: Option<PathBuf>,

    /// Season the standings belong to
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(2020..=2025))]
    year: Option<u32>,

    /// Results table to update
    #[arg(long, default_value = "NAIA_blank - NAIA_results.csv")]
    csv: PathBuf,

    /// File tracking already scraped URLs
    #[arg(long, default_value = "processed_urls.json")]
    processed_file: PathBuf,

    /// Print the records as JSON instead of updating the results table
    #[arg(long)]
    dry_run: bool,

    /// List already processed URLs and exit
    #[arg(long)]
    list_processed: bool,

    /// Forget all processed URLs and exit
    #[arg(long)]
    clear_processed: bool,

    /// Debug mode - save raw and annotated HTML pages
    #[arg(short, long)]
    debug: bool,

    /// Where debug pages are written
    #[arg(long, default_value = "./debug")]
    debug_dir: PathBuf,
}

fn print_processed(processed: &ProcessedUrls) {
    if processed.is_empty() {
        println!("No URLs have been processed yet");
        return;
    }

    println!("Found {} processed URLs:", processed.len());
    for (i, url) in processed.iter().enumerate() {
        println!("{}. {}", i + 1, url);
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    let store = ProcessedUrlStore::new(&args.processed_file);

    // 3. Processed URL management
    if args.list_processed {
        print_processed(&store.load()?);
        return Ok(());
    }
    if args.clear_processed {
        let mut processed = store.load()?;
        processed.clear();
        store.save(&processed)?;
        tracing::info!("Cleared all processed URLs in {}", store.path().display());
        return Ok(());
    }

    let year = args.year
        .ok_or_else(|| AppError::Config("--year is required to scrape standings".to_string()))?;

    let mut scraper = StandingsScraper::new();
    if args.debug {
        scraper = scraper.with_debug_dir(&args.debug_dir);
    }

    // 4. Get the records, from a saved page or the network
    let records = if let Some(path) = &args.html_file {
        tracing::info!("Parsing saved page: {}", path.display());
        let html = std::fs::read_to_string(path)?;
        scraper.scrape_html(&html, year)
    } else if let Some(url) = &args.url {
        let mut processed = store.load()?;

        match scraper.scrape(url, year, &mut processed).await {
            ScrapeOutcome::Success { url, year, records } => {
                tracing::info!("Scraped {} ({}): {} records", url, year, records.len());
                if !args.dry_run {
                    store.save(&processed)?;
                }
                records
            }
            ScrapeOutcome::Skipped { url, reason } => {
                tracing::info!("Skipping {} ({}) to avoid duplicate scraping", url, reason);
                print_processed(&processed);
                return Ok(());
            }
            ScrapeOutcome::Failed { url, reason, error } => {
                return Err(AppError::Processing(format!("Failed to scrape {} ({}): {}", url, reason, error)));
            }
        }
    } else {
        return Err(AppError::Config(
            "No standings source: pass --url, set NAIA_START_URL, or pass --html-file".to_string(),
        ));
    };

    tracing::info!("Scraped {} standings for {}", records.len(), year);

    // 5. Output
    if args.dry_run {
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| AppError::Processing(format!("Failed to serialize records: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    if records.is_empty() {
        tracing::warn!("No standings found for {}, results table left untouched", year);
        return Ok(());
    }

    let mut table = StandingsTable::load(&args.csv)?;
    let report = table.apply_standings(&records, year);
    if report.missing_column {
        return Err(AppError::Processing(format!(
            "Results table {} has no '{}' column", args.csv.display(), report.column
        )));
    }
    table.save(&args.csv)?;

    tracing::info!(
        "Processing finished. Updated: {}, Unmatched: {}",
        report.updated.len(),
        report.unmatched.len()
    );
    for school in &report.unmatched {
        tracing::warn!("No row in results table for '{}'", school);
    }

    Ok(())
}
