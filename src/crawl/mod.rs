// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Concurrent crawling starting from one or more seed URLs
// - Respects same-origin restriction (doesn't crawl external sites)
// - Configurable depth limit
// - Capped number of requests in flight
//
// Rust concepts:
// - Async programming: For concurrent network requests
// - Shared state: Arc + Mutex around the visited and email sets
// =============================================================================

mod scheduler;
mod session;

pub use session::{CrawlReport, CrawlSession};
