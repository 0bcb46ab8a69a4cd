use crate::config::Config;
use crate::fetcher::{FetchError, HttpFetcher, PageFetcher};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// State backed by a real HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(HttpFetcher::new(config.fetch())?)))
    }
}
