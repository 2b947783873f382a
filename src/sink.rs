//! Notification sinks
//!
//! A sink receives one [`Digest`] per run and either delivers it or reports
//! a [`SinkError`], which is the only failure a run propagates.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::SinkError;
use crate::outreach::Digest;

/// Delivers a digest as one unit
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver `digest`
    async fn deliver(&self, digest: &Digest) -> Result<(), SinkError>;
}

/// Writes the digest to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    async fn deliver(&self, digest: &Digest) -> Result<(), SinkError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "Subject: {}\n", digest.subject)?;
        write!(out, "{}", digest.body())?;
        out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    body: String,
    #[serde(flatten)]
    digest: &'a Digest,
}

/// POSTs the digest as JSON
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    /// Sink posting to `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    #[instrument(skip(self, digest), fields(entries = digest.len()))]
    async fn deliver(&self, digest: &Digest) -> Result<(), SinkError> {
        let payload = WebhookPayload {
            body: digest.body(),
            digest,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SinkError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!("Digest delivered to webhook");
        Ok(())
    }
}

/// Keeps every delivered digest in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<Digest>>,
}

impl MemorySink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Digests delivered so far
    pub fn delivered(&self) -> Vec<Digest> {
        self.delivered
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for MemorySink {
    async fn deliver(&self, digest: &Digest) -> Result<(), SinkError> {
        self.delivered
            .lock()
            .map_err(|_| SinkError::Delivery("memory sink poisoned".to_string()))?
            .push(digest.clone());
        Ok(())
    }
}
