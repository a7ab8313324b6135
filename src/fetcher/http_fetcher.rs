use std::time::Duration;

use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;

use crate::app::{NewsprintError, Result};
use crate::domain::RawEntry;
use crate::fetcher::{FetchOutcome, Fetcher};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent("newsprint/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    async fn fetch_inner(&self, url: &str) -> Result<Vec<RawEntry>> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;
        let body = response.bytes().await?;
        parse_body(&body)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        match self.fetch_inner(url).await {
            Ok(entries) => FetchOutcome::Parsed(entries),
            Err(e) => FetchOutcome::Failed(e.to_string()),
        }
    }
}

/// Parse an RSS/Atom/JSON feed body into raw entries, in feed order.
pub fn parse_body(body: &[u8]) -> Result<Vec<RawEntry>> {
    let feed = parser::parse(body).map_err(|e| NewsprintError::FeedParse(e.to_string()))?;

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| RawEntry {
            title: entry.title.map(|t| t.content),
            published: entry
                .published
                .or(entry.updated)
                .map(|dt| dt.to_rfc2822()),
            summary: entry.summary.map(|s| s.content),
        })
        .collect())
}
