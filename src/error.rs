//! Error types for Job Scout
//!
//! Per-source failures ([`FetchError`], [`ExtractionError`]) are recovered at
//! the source boundary and recorded in the run report. Only [`SinkError`] and
//! startup [`ConfigError`]s ever surface as a failed run.

use thiserror::Error;

/// The main error type for Job Scout operations
#[derive(Error, Debug)]
pub enum Error {
    /// Delivering the digest failed
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// The fetch collaborator could not retrieve a source's document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// A source document could not be processed by its extractor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A configured selector is not valid CSS
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Traversal of the document failed
    #[error("Content parsing failed: {0}")]
    ParsingFailed(String),
}

/// The notification sink failed to deliver the digest
#[derive(Error, Debug)]
pub enum SinkError {
    /// Transport failure before a response was received
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Receiver answered with a non-2xx status
    #[error("Digest rejected with HTTP {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Writing the digest locally failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for [`crate::config::MonitorConfig`]
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// No sources configured
    #[error("At least one source must be configured")]
    EmptySources,

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Why a single source contributed zero candidates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceFailure {
    /// The document was never retrieved
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The document was retrieved but could not be extracted
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Result type alias for Job Scout operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::HttpStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if err.is_body() || err.is_decode() {
            return FetchError::Body(err.to_string());
        }
        FetchError::Network(err.to_string())
    }
}
