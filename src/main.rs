// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (progress goes to stderr, results to stdout)
// 3. Crawl every seed and collect emails
// 4. Save the emails file and print a summary
// 5. Exit with proper code (0 = emails found, 1 = none found, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - crawl settings
mod crawl;         // src/crawl/ - the crawl engine and its shared state
mod extract;       // src/extract/ - emails and links from page content
mod fetch;         // src/fetch/ - getting page text over HTTP
mod output;        // src/output.rs - emails file and summary

use clap::Parser;
use cli::Cli;
use crawl::CrawlSession;
use fetch::HttpFetcher;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use anyhow::Result;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = at least one email found and saved
//   Ok(1) = crawl finished but found nothing
//   Ok(2) = emails found but the file could not be written
//   Err = bad input or setup failure
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let seeds = cli.seed_urls()?;
    let config = cli.crawl_config();

    println!("🔍 Crawling {} seed(s)", seeds.len());
    println!("📊 Max crawl depth: {}", config.depth);

    let fetcher = Arc::new(HttpFetcher::new(&config)?);
    let session = CrawlSession::new(config, fetcher);
    let report = session.run(&seeds).await;

    // The report is printed even if saving fails, so nothing is lost
    let saved = output::write_report(&cli.output, &report.emails);
    output::print_report(&report, &cli.output, cli.json)?;

    if let Err(e) = saved {
        tracing::error!(path = %cli.output.display(), error = %e, "Failed to save emails");
        eprintln!("Error: {:#}", e);
        return Ok(2);
    }
    tracing::info!(path = %cli.output.display(), count = report.emails.len(), "Emails saved");

    if report.emails.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// RUST_LOG wins if set, otherwise info (or debug with --verbose)
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
