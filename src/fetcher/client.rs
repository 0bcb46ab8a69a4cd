use crate::config::FetchConfig;
use crate::fetcher::{
    errors::FetchError,
    types::{FetchedPage, host_of},
};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::{
    Client, ClientBuilder,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use std::io::{self, Read};
use tokio_util::io::{StreamReader, SyncIoBridge};
use tracing::{info, instrument};
use url::Url;

const MAX_REDIRECTS: usize = 10;

/// Source of pages for the metadata endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Issues a GET for `url` and returns the response with its body still
    /// unread.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

pub fn build_client(config: &FetchConfig) -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );

    ClientBuilder::new()
        .connect_timeout(config.connect_timeout())
        .timeout(config.timeout())
        .user_agent(config.user_agent())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .default_headers(headers)
        .build()
        .map_err(FetchError::from_reqwest_error)
}

/// Fetches pages over HTTP(S) with reqwest.
///
/// The body is exposed as a blocking reader bridged onto the async
/// response stream, so it has to be consumed off the async executor
/// (`spawn_blocking`). It stops with a clean end of stream after
/// `max_body_bytes`.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: u64,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(config)?,
            max_body_bytes: config.max_body_bytes(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed_url = Url::parse(url)?;
        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(parsed_url.scheme().to_string()));
        }

        let response = self
            .client
            .get(parsed_url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        let protocol = format!("{:?}", response.version());
        let url_final = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(str::to_string);

        info!(
            %status,
            %url_final,
            content_type = content_type.as_deref().unwrap_or(""),
            "fetched page"
        );

        let stream = response.bytes_stream().map_err(io::Error::other).boxed();
        let body = SyncIoBridge::new(StreamReader::new(stream)).take(self.max_body_bytes);

        Ok(FetchedPage {
            host: host_of(&parsed_url),
            url: parsed_url,
            url_final,
            status,
            protocol,
            content_type,
            body: Box::new(body),
        })
    }
}
