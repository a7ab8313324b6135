pub mod http_fetcher;

use async_trait::async_trait;

use crate::domain::RawEntry;

/// Outcome of one fetch-and-parse attempt.
///
/// Failures are data, not errors: nothing crosses this boundary as a panic
/// or an `Err`, so a bad network day or a malformed feed costs one cycle's
/// content, never the loop.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The feed parsed; entries are in feed order.
    Parsed(Vec<RawEntry>),
    /// Fetch or parse failed; the reason is for the log line.
    Failed(String),
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}
