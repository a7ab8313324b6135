use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::domain::{FeedSource, SourceRegistry};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::printer::LprDispatcher;

pub struct AppContext {
    pub config: Config,
    pub registry: SourceRegistry,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub normalizer: Normalizer,
    pub dispatcher: LprDispatcher,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new());
        Self::with_fetcher(config, fetcher)
    }

    /// Build a context around an arbitrary fetcher. Used by tests to swap in
    /// a stub that never touches the network.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let sources = config
            .sources
            .iter()
            .map(|s| FeedSource {
                name: s.name.clone(),
                url: s.url.clone(),
            })
            .collect();
        let registry = SourceRegistry::new(sources)?;

        Ok(Self {
            config,
            registry,
            fetcher,
            normalizer: Normalizer::new(),
            dispatcher: LprDispatcher::new(),
        })
    }
}
