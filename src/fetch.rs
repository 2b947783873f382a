//! Document fetching
//!
//! The pipeline itself never touches the network. A [`DocumentFetcher`]
//! returns each source's raw markup or a [`FetchError`], and [`fetch_all`]
//! collects one result per source in configuration order.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, info, instrument};

use crate::config::{FetchConfig, SourceConfig};
use crate::error::FetchError;

/// Retrieves a source's search page
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch `url` and return the body as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetcher backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a client with the configured timeout and user agent
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }
}

/// Saturating conversion for error reporting
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let timeout_ms = millis(self.timeout);
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(timeout_ms)
            } else {
                FetchError::from(e)
            }
        };

        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(classify)?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Fetcher serving canned documents, keyed by URL.
///
/// Unknown URLs fail with `HttpStatus 404`. Used for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    documents: HashMap<String, Result<String, FetchError>>,
}

impl StaticFetcher {
    /// Empty fetcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`
    pub fn with_document(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(url.into(), Ok(body.into()));
        self
    }

    /// Fail requests for `url` with `error`
    pub fn with_failure(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.documents.insert(url.into(), Err(error));
        self
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.documents
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::HttpStatus {
                    status: 404,
                    url: url.to_string(),
                })
            })
    }
}

/// One source's fetch outcome
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// The source fetched
    pub source: SourceConfig,
    /// Raw markup, or why it could not be retrieved
    pub body: Result<String, FetchError>,
}

/// Fetch every source concurrently; results come back in `sources` order
pub async fn fetch_all(fetcher: &dyn DocumentFetcher, sources: &[SourceConfig]) -> Vec<SourceDocument> {
    let requests = sources.iter().map(|source| async move {
        info!("Searching {}...", source.source_id);
        SourceDocument {
            source: source.clone(),
            body: fetcher.fetch(&source.search_url).await,
        }
    });
    join_all(requests).await
}
