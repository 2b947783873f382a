//! Job Scout - Job-Board Monitoring Pipeline
//!
//! Searches several job-listing sources for a role, keeps postings in a
//! target geography, deduplicates them across sources and composes a digest
//! with a personalized outreach note per listing.
//!
//! # Architecture
//!
//! ```text
//! Sources ──▶ Fetcher ──▶ Extractors ──▶ GeoFilter ──▶ Normalizer
//!                          (per board)                     │
//!                                                          ▼
//!             Sink ◀── Digest ◀── OutreachComposer ◀── dedupe
//! ```
//!
//! Each board's markup is unstable, so every board has its own extractor and
//! a structural mismatch degrades to zero candidates. A failing source never
//! aborts the run; only digest delivery can.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use job_scout::config::MonitorConfig;
//! use job_scout::fetch::HttpFetcher;
//! use job_scout::pipeline::{run_once, Pipeline};
//! use job_scout::sink::StdoutSink;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonitorConfig::default();
//!     let pipeline = Pipeline::new(&config);
//!     let fetcher = HttpFetcher::new(&config.fetch)?;
//!
//!     let summary = run_once(&pipeline, &config.sources, &fetcher, &StdoutSink).await?;
//!     println!("{} jobs", summary.report.records.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dedupe;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod geo;
pub mod normalize;
pub mod outreach;
pub mod pipeline;
pub mod sink;

// Re-exports for convenience
pub use config::{MonitorConfig, SourceConfig};
pub use error::{Error, Result};
pub use extraction::{ExtractorKind, ListingExtractor, RawCandidate};
pub use geo::GeoFilter;
pub use normalize::{JobRecord, Normalizer};
pub use outreach::{Digest, OutreachComposer};
pub use pipeline::{run_once, Pipeline, RunReport, RunSummary, SourceOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
