//! End-to-end pipeline tests
//!
//! Runs full monitoring passes against an in-memory fetcher and a recording
//! sink.
//!
//! ```bash
//! cargo test --test pipeline_tests
//! ```

use async_trait::async_trait;
use job_scout::config::{MonitorConfig, SourceConfig};
use job_scout::error::{Error, FetchError, SinkError};
use job_scout::fetch::StaticFetcher;
use job_scout::outreach::Digest;
use job_scout::pipeline::{run_once, Pipeline, SourceOutcome};
use job_scout::sink::{MemorySink, NotificationSink};
use job_scout::JobRecord;
use pretty_assertions::assert_eq;

const BOARD_A: &str = "https://a.jobs.test/search?q=java";
const BOARD_B: &str = "https://b.jobs.test/jobs/java";

fn config() -> MonitorConfig {
    MonitorConfig {
        sources: vec![
            SourceConfig::new("Indeed", BOARD_A),
            SourceConfig::new("Naukri", BOARD_B),
        ],
        ..Default::default()
    }
}

fn indeed_card(title: &str, href: &str, location: &str) -> String {
    format!(
        r#"<div class="job_seen_beacon"><h2 class="jobTitle"><a href="{}">{}</a></h2><div class="companyLocation">{}</div></div>"#,
        href, title, location
    )
}

fn naukri_card(title: &str, href: &str, location: &str) -> String {
    format!(
        r#"<article class="jobTuple"><a class="title" href="{}">{}</a><ul><li class="location">{}</li></ul></article>"#,
        href, title, location
    )
}

struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    async fn deliver(&self, _digest: &Digest) -> Result<(), SinkError> {
        Err(SinkError::Rejected {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}

#[tokio::test]
async fn test_only_target_region_survives() {
    let config = config();
    let long_title = format!("Java Developer {}", "x".repeat(200));
    let fetcher = StaticFetcher::new()
        .with_document(BOARD_A, indeed_card("Java Developer", "/rc/1", "Remote, Germany"))
        .with_document(BOARD_B, naukri_card(&long_title, "/job/bangalore-1", "Bangalore, India"));
    let sink = MemorySink::new();

    let summary = run_once(&Pipeline::new(&config), &config.sources, &fetcher, &sink)
        .await
        .unwrap();

    assert_eq!(summary.report.records.len(), 1);
    let record = &summary.report.records[0];
    assert_eq!(record.source, "Naukri");
    assert_eq!(record.title.chars().count(), 120);
    assert_eq!(record.link, "https://b.jobs.test/job/bangalore-1");

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].entries[0].record, *record);
    assert!(delivered[0].entries[0].message.contains("on Naukri"));
}

#[tokio::test]
async fn test_fetch_failure_does_not_abort_run() {
    let config = config();
    let fetcher = StaticFetcher::new()
        .with_failure(BOARD_A, FetchError::Timeout(10_000))
        .with_document(BOARD_B, naukri_card("Java Developer", "/job/2", "Pune"));
    let sink = MemorySink::new();

    let summary = run_once(&Pipeline::new(&config), &config.sources, &fetcher, &sink)
        .await
        .unwrap();

    assert_eq!(summary.report.failed_sources(), 1);
    assert!(matches!(
        &summary.report.outcomes[0],
        SourceOutcome::Failed { source_id, .. } if source_id == "Indeed"
    ));
    assert_eq!(
        summary.report.outcomes[1],
        SourceOutcome::Searched {
            source_id: "Naukri".to_string(),
            candidates: 1,
            accepted: 1,
        }
    );
    assert_eq!(sink.delivered().len(), 1);
}

#[tokio::test]
async fn test_no_matches_skips_sink() {
    let config = config();
    let fetcher = StaticFetcher::new()
        .with_document(BOARD_A, indeed_card("Java Developer", "/rc/1", "Berlin"))
        .with_document(BOARD_B, "<html><body>No results</body></html>");
    let sink = MemorySink::new();

    let summary = run_once(&Pipeline::new(&config), &config.sources, &fetcher, &sink)
        .await
        .unwrap();

    assert!(summary.report.records.is_empty());
    assert!(summary.digest.is_none());
    assert!(sink.delivered().is_empty());
}

#[tokio::test]
async fn test_no_matches_never_reaches_failing_sink() {
    let config = config();
    let fetcher = StaticFetcher::new();

    let summary = run_once(&Pipeline::new(&config), &config.sources, &fetcher, &FailingSink).await;
    assert!(summary.is_ok());
}

#[tokio::test]
async fn test_sink_failure_is_fatal() {
    let config = config();
    let fetcher =
        StaticFetcher::new().with_document(BOARD_B, naukri_card("Java Developer", "/job/3", "Delhi"));

    let err = run_once(&Pipeline::new(&config), &config.sources, &fetcher, &FailingSink)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Sink(SinkError::Rejected { status: 503, .. })));
}

#[tokio::test]
async fn test_cross_source_duplicates_collapse() {
    let config = config();
    let shared = "https://jobs.example.test/posting/77";
    let fetcher = StaticFetcher::new()
        .with_document(BOARD_A, indeed_card("Java Dev (Indeed)", shared, "Mumbai"))
        .with_document(BOARD_B, naukri_card("Java Dev (Naukri)", shared, "Mumbai"));
    let sink = MemorySink::new();

    let summary = run_once(&Pipeline::new(&config), &config.sources, &fetcher, &sink)
        .await
        .unwrap();

    assert_eq!(
        summary.report.records,
        vec![JobRecord {
            title: "Java Dev (Naukri)".to_string(),
            link: shared.to_string(),
            source: "Naukri".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_digest_capped_at_limit() {
    let config = config();
    let cards: String = (0..20)
        .map(|i| naukri_card(&format!("Java Developer {}", i), &format!("/job/{}", i), "Indore"))
        .collect();
    let fetcher = StaticFetcher::new().with_document(BOARD_B, cards);
    let sink = MemorySink::new();

    let summary = run_once(&Pipeline::new(&config), &config.sources, &fetcher, &sink)
        .await
        .unwrap();

    assert_eq!(summary.report.records.len(), 20);
    let digest = summary.digest.unwrap();
    assert_eq!(digest.len(), 15);
    assert_eq!(digest.entries[14].record.title, "Java Developer 14");
    assert!(digest.body().starts_with("Hourly Java Developer Job Updates ("));
}
