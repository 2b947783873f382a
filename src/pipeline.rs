//! Monitoring pipeline
//!
//! ```text
//! SourceDocument ──▶ Extractor ──▶ GeoFilter ──▶ Normalizer ──┐
//!   (per source, in configuration order)                      │
//!                                                             ▼
//!                      Sink ◀── Digest ◀── Composer ◀── dedupe
//! ```
//!
//! Per-source failures are logged and recorded as [`SourceOutcome::Failed`];
//! they never abort the run. Only delivering the digest can fail a run.

use chrono::{DateTime, Local};
use scraper::Html;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::{MonitorConfig, SourceConfig};
use crate::dedupe::dedupe;
use crate::error::{ExtractionError, Result, SourceFailure};
use crate::fetch::{fetch_all, DocumentFetcher, SourceDocument};
use crate::geo::GeoFilter;
use crate::normalize::{JobRecord, Normalizer};
use crate::outreach::{Digest, DigestEntry, OutreachComposer};
use crate::sink::NotificationSink;

/// What one source contributed to a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// Extraction ran
    Searched {
        /// Source id
        source_id: String,
        /// Candidates the extractor produced
        candidates: usize,
        /// Records that passed the geography filter
        accepted: usize,
    },
    /// The source contributed nothing because of an error
    Failed {
        /// Source id
        source_id: String,
        /// Reason
        #[serde(serialize_with = "serialize_display")]
        error: SourceFailure,
    },
}

fn serialize_display<S: serde::Serializer>(
    error: &SourceFailure,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl SourceOutcome {
    /// Source id
    pub fn source_id(&self) -> &str {
        match self {
            Self::Searched { source_id, .. } | Self::Failed { source_id, .. } => source_id,
        }
    }

    /// True for failed sources
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result of processing every source document
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Canonical, deduplicated records
    pub records: Vec<JobRecord>,
    /// One outcome per source, in configuration order
    pub outcomes: Vec<SourceOutcome>,
}

impl RunReport {
    /// Number of sources that failed
    pub fn failed_sources(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

/// Outcome of a full [`run_once`]
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Processing report
    pub report: RunReport,
    /// Digest handed to the sink; `None` when nothing matched
    pub digest: Option<Digest>,
}

/// Extraction, filtering, normalization and composition, wired from config
#[derive(Debug, Clone)]
pub struct Pipeline {
    geo: GeoFilter,
    normalizer: Normalizer,
    composer: OutreachComposer,
    keywords: Vec<String>,
    digest_limit: usize,
    digest_subject: String,
}

impl Pipeline {
    /// Build every component from `config`
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            geo: GeoFilter::new(&config.locations),
            normalizer: Normalizer::new(config.max_title_chars),
            composer: OutreachComposer::new(config.outreach_template.clone()),
            keywords: config.keywords.clone(),
            digest_limit: config.digest_limit,
            digest_subject: config.digest_subject.clone(),
        }
    }

    /// Extract, filter and normalize one source's markup
    #[instrument(skip(self, source, html), fields(source = %source.source_id))]
    pub fn process_source(
        &self,
        source: &SourceConfig,
        html: &str,
    ) -> std::result::Result<(usize, Vec<JobRecord>), ExtractionError> {
        let kind = source.extractor_kind();
        let extractor = kind.build(&self.keywords);
        let document = Html::parse_document(html);

        let candidates = extractor.extract(&document, source)?;
        let found = candidates.len();

        let records: Vec<JobRecord> = candidates
            .into_iter()
            .filter(|c| self.geo.matches(Some(c.location_text.as_str())))
            .map(|c| self.normalizer.normalize(c, source))
            .collect();

        debug!(
            "{} ({}): {} candidates, {} in target region",
            source.source_id,
            extractor.name(),
            found,
            records.len()
        );
        Ok((found, records))
    }

    /// Process documents strictly in order, then deduplicate
    pub fn process(&self, documents: Vec<SourceDocument>) -> RunReport {
        let mut accumulated = Vec::new();
        let mut outcomes = Vec::with_capacity(documents.len());

        for SourceDocument { source, body } in documents {
            let result = body
                .map_err(SourceFailure::from)
                .and_then(|html| self.process_source(&source, &html).map_err(SourceFailure::from));

            match result {
                Ok((candidates, records)) => {
                    outcomes.push(SourceOutcome::Searched {
                        source_id: source.source_id.clone(),
                        candidates,
                        accepted: records.len(),
                    });
                    accumulated.extend(records);
                }
                Err(error) => {
                    warn!("Skipping {}: {}", source.source_id, error);
                    outcomes.push(SourceOutcome::Failed {
                        source_id: source.source_id.clone(),
                        error,
                    });
                }
            }
        }

        let records = dedupe(accumulated);
        info!("Found {} jobs", records.len());
        RunReport { records, outcomes }
    }

    /// Compose the digest for the first `digest_limit` records.
    ///
    /// Returns `None` for an empty record set; the sink is then skipped.
    pub fn digest(&self, records: &[JobRecord], now: DateTime<Local>) -> Option<Digest> {
        if records.is_empty() {
            return None;
        }
        let entries = records
            .iter()
            .take(self.digest_limit)
            .map(|record| DigestEntry {
                message: self.composer.compose(record),
                record: record.clone(),
            })
            .collect();

        Some(Digest {
            subject: self.digest_subject.clone(),
            generated_at: now,
            entries,
        })
    }
}

/// One monitoring run: fetch, process, compose, deliver.
///
/// Per-source failures are absorbed into the report. A sink failure is
/// returned as the run's error.
pub async fn run_once(
    pipeline: &Pipeline,
    sources: &[SourceConfig],
    fetcher: &dyn DocumentFetcher,
    sink: &dyn NotificationSink,
) -> Result<RunSummary> {
    let documents = fetch_all(fetcher, sources).await;
    let report = pipeline.process(documents);

    let digest = match pipeline.digest(&report.records, Local::now()) {
        Some(digest) => digest,
        None => {
            info!("No new jobs found");
            return Ok(RunSummary {
                report,
                digest: None,
            });
        }
    };

    sink.deliver(&digest).await?;
    info!("Digest with {} entries sent", digest.len());

    Ok(RunSummary {
        report,
        digest: Some(digest),
    })
}
