// src/fetch/mod.rs
// =============================================================================
// This module is the crawler's only window onto the network.
//
// The crawler never talks to reqwest directly. It calls a Fetcher, which
// either hands back decoded page text or says "nothing here" (None).
// That keeps the crawl engine testable with an in-memory fetcher.
//
// Submodules:
// - http: The real implementation, built on reqwest
// =============================================================================

mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpFetcher;

/// Why a page could not be turned into text.
///
/// These never reach the crawler: `Fetcher::fetch` logs them and returns None.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Http(reqwest::StatusCode),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("not a text document ({0})")]
    NotText(String),
}

/// Source of page text for the crawler
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the decoded text of `url`, or None for non-text content and
    /// any network/HTTP failure
    async fn fetch(&self, url: &str) -> Option<String>;
}
