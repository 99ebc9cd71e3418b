// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP with reqwest.
//
// What counts as a page:
// - The response status is 2xx
// - The Content-Type header mentions "text" or "html"
//
// Decoding (encoding_rs):
// - A byte-order mark wins
// - Then the charset declared in Content-Type
// - Then UTF-8, if the bytes are valid UTF-8
// - Otherwise chardetng guesses the encoding
// Bytes that are invalid in the chosen encoding are dropped.
//
// Every failure (DNS, TLS, timeout, 404, images, PDFs...) is logged and
// becomes None. A broken page never stops the crawl.
// =============================================================================

use super::{FetchError, Fetcher};
use crate::config::CrawlConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use reqwest::{header::CONTENT_TYPE, Client};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds one client for the whole run
    // reqwest pools connections internally, so all tasks share it
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("failed to build HTTP client")?;

        Ok(HttpFetcher { client })
    }

    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if !is_textual(&content_type) {
            return Err(FetchError::NotText(content_type));
        }

        let declared = declared_encoding(&content_type);
        let bytes = response.bytes().await?;
        Ok(decode_body(&bytes, declared))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.fetch_text(url).await {
            Ok(text) => Some(text),
            Err(FetchError::NotText(content_type)) => {
                tracing::debug!(url, content_type = %content_type, "Skipping non-text content");
                None
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Failed to fetch");
                None
            }
        }
    }
}

fn is_textual(content_type: &str) -> bool {
    content_type.contains("text") || content_type.contains("html")
}

// The charset parameter of a Content-Type header, if encoding_rs knows it
fn declared_encoding(content_type: &str) -> Option<&'static Encoding> {
    let parsed: mime::Mime = content_type.parse().ok()?;
    let charset = parsed.get_param(mime::CHARSET)?;
    Encoding::for_label(charset.as_str().as_bytes())
}

fn decode_body(bytes: &[u8], declared: Option<&'static Encoding>) -> String {
    let encoding = match (Encoding::for_bom(bytes), declared) {
        (Some((from_bom, _)), _) => from_bom,
        (None, Some(declared)) => declared,
        (None, None) if std::str::from_utf8(bytes).is_ok() => UTF_8,
        (None, None) => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        }
    };

    // decode() strips the BOM and replaces bad sequences with U+FFFD
    let (text, _, _) = encoding.decode(bytes);
    text.chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}
