// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The parsed flags are turned into a CrawlConfig (src/config.rs) and a list
// of seed URLs before any crawling starts.
// =============================================================================

use crate::config::{CrawlConfig, DEFAULT_CONCURRENCY, DEFAULT_DEPTH, DEFAULT_TIMEOUT_SECS};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "mail-harvester",
    version,
    about = "Crawl websites and collect the email addresses they publish",
    long_about = "mail-harvester starts from one or more seed pages, follows links on the same \
                  site up to a depth limit, and saves every email address it finds to a file."
)]
pub struct Cli {
    /// Seed URLs to start crawling from (e.g., https://example.com)
    pub seeds: Vec<String>,

    /// Read additional seed URLs from a file, one per line
    ///
    /// Blank lines and lines starting with '#' are ignored
    #[arg(long)]
    pub seeds_file: Option<PathBuf>,

    /// Maximum crawl depth
    ///
    /// Depth 0 = just the seed pages
    /// Depth 1 = seed pages + the pages they link to
    /// etc.
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Maximum number of pages fetched at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Stop the whole crawl after this many seconds and keep what was found
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// User-Agent header to send
    #[arg(long)]
    pub user_agent: Option<String>,

    /// File to save the collected emails to
    #[arg(long, short, default_value = "emails.txt")]
    pub output: PathBuf,

    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Show debug logs (every skipped link)
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let defaults = CrawlConfig::default();
        CrawlConfig {
            depth: self.depth,
            max_concurrency: self.concurrency.max(1),
            request_timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            deadline: self.deadline_secs.map(Duration::from_secs),
        }
    }

    // Collects seeds from the command line and the seeds file, in that order
    pub fn seed_urls(&self) -> Result<Vec<Url>> {
        let mut raw: Vec<String> = self.seeds.clone();

        if let Some(path) = &self.seeds_file {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read seeds file {}", path.display()))?;
            raw.extend(parse_seeds_file(&contents));
        }

        if raw.is_empty() {
            bail!("no seed URLs given (pass them as arguments or with --seeds-file)");
        }

        raw.iter()
            .map(|seed| parse_seed(seed))
            .collect()
    }
}

fn parse_seeds_file(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn parse_seed(seed: &str) -> Result<Url> {
    let url = Url::parse(seed).with_context(|| format!("invalid seed URL '{}'", seed))?;
    if url.cannot_be_a_base() {
        bail!("seed URL '{}' cannot have links resolved against it", seed);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mail-harvester", "https://example.com"]);
        let config = cli.crawl_config();
        assert_eq!(config.depth, 2);
        assert_eq!(config.max_concurrency, 16);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.deadline, None);
        assert_eq!(cli.output, PathBuf::from("emails.txt"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "mail-harvester",
            "https://example.com",
            "--depth",
            "0",
            "--concurrency",
            "0",
            "--deadline-secs",
            "30",
            "--user-agent",
            "bot/1.0",
        ]);
        let config = cli.crawl_config();
        assert_eq!(config.depth, 0);
        assert_eq!(config.max_concurrency, 1);
        assert_eq!(config.deadline, Some(Duration::from_secs(30)));
        assert_eq!(config.user_agent, "bot/1.0");
    }

    #[test]
    fn test_seed_urls_from_args() {
        let cli = Cli::parse_from(["mail-harvester", "https://a.test", "https://b.test/x"]);
        let seeds = cli.seed_urls().unwrap();
        assert_eq!(seeds[0].as_str(), "https://a.test/");
        assert_eq!(seeds[1].as_str(), "https://b.test/x");
    }

    #[test]
    fn test_seed_urls_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# company sites\n\nhttps://a.test\n  https://b.test  ").unwrap();

        let path = file.path().to_str().unwrap();
        let cli = Cli::parse_from(["mail-harvester", "https://c.test", "--seeds-file", path]);
        let seeds = cli.seed_urls().unwrap();

        let seeds: Vec<&str> = seeds.iter().map(Url::as_str).collect();
        assert_eq!(seeds, vec!["https://c.test/", "https://a.test/", "https://b.test/"]);
    }

    #[test]
    fn test_no_seeds_is_an_error() {
        let cli = Cli::parse_from(["mail-harvester"]);
        assert!(cli.seed_urls().is_err());
    }

    #[test]
    fn test_relative_seed_is_an_error() {
        let cli = Cli::parse_from(["mail-harvester", "/just/a/path"]);
        let err = cli.seed_urls().unwrap_err();
        assert!(err.to_string().contains("invalid seed URL"));
    }

    #[test]
    fn test_mailto_seed_is_an_error() {
        let cli = Cli::parse_from(["mail-harvester", "mailto:a@x.com"]);
        assert!(cli.seed_urls().is_err());
    }
}
