// src/config.rs
// =============================================================================
// Settings for one crawl run.
//
// The CLI (src/cli.rs) fills this in from command-line flags, tests build it
// directly with struct update syntax: CrawlConfig { depth: 0, ..Default::default() }
// =============================================================================

use std::time::Duration;

pub const DEFAULT_DEPTH: u32 = 2;
pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// How many link hops to follow from each seed (0 = only the seed)
    pub depth: u32,
    /// Upper bound on fetches in flight at the same time
    pub max_concurrency: usize,
    /// Timeout for a single HTTP request
    pub request_timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Stop the whole run after this long, keeping what was found so far
    pub deadline: Option<Duration>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            depth: DEFAULT_DEPTH,
            max_concurrency: DEFAULT_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            deadline: None,
        }
    }
}
