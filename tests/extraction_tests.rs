//! Extraction module tests
//!
//! These tests run each board's extractor against saved-page style fixtures,
//! including pages whose structure has drifted.

use job_scout::config::SourceConfig;
use job_scout::extraction::{CardLayout, ExtractorKind, RawCandidate};
use job_scout::GeoFilter;
use pretty_assertions::assert_eq;
use scraper::Html;

fn extract(kind: ExtractorKind, source: &SourceConfig, html: &str) -> Vec<RawCandidate> {
    let document = Html::parse_document(html);
    kind.build(&["java".to_string(), "engineer".to_string()])
        .extract(&document, source)
        .expect("extraction should not fail on well-formed selectors")
}

const INDEED_PAGE: &str = r#"
<html><body>
  <div id="mosaic-jobResults">
    <div class="job_seen_beacon">
      <table><tr><td>
        <h2 class="jobTitle css-1psdjh5"><a href="/rc/clk?jk=111" data-jk="111"><span title="Java Developer">Java Developer</span></a></h2>
        <div class="company_location"><div class="companyLocation">Hyderabad, Telangana</div></div>
      </td></tr></table>
    </div>
    <div class="job_seen_beacon">
      <h2 class="jobTitle"><span>Sponsored: no anchor</span></h2>
      <div class="companyLocation">Remote</div>
    </div>
    <div class="job_seen_beacon">
      <h2 class="jobTitle"><a href="/rc/clk?jk=333">Backend Engineer</a></h2>
    </div>
  </div>
</body></html>
"#;

#[test]
fn test_indeed_fixture() {
    let source = SourceConfig::new("Indeed", "https://www.indeed.com/jobs?q=java");
    let out = extract(ExtractorKind::Indeed, &source, INDEED_PAGE);

    assert_eq!(
        out,
        vec![
            RawCandidate {
                title_text: "Java Developer".to_string(),
                link_raw: "/rc/clk?jk=111".to_string(),
                location_text: "Hyderabad, Telangana".to_string(),
                source_id: "Indeed".to_string(),
            },
            RawCandidate {
                title_text: "Sponsored: no anchor".to_string(),
                link_raw: String::new(),
                location_text: "Remote".to_string(),
                source_id: "Indeed".to_string(),
            },
        ]
    );
}

#[test]
fn test_glassdoor_fixture() {
    let source = SourceConfig::new("Glassdoor", "https://www.glassdoor.co.in/Job/java-jobs.htm");
    let html = r#"
        <ul class="jobsList">
          <li class="react-job-listing" data-id="1">
            <div><a class="jobLink" href="/partner/jobListing.htm?jobListingId=1">Senior Java Engineer</a></div>
            <div><span class="jobLocation">Noida</span></div>
          </li>
          <li class="react-job-listing" data-id="2">
            <span class="jobLocation">Gurgaon</span>
          </li>
        </ul>"#;
    let out = extract(ExtractorKind::Glassdoor, &source, html);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title_text, "Senior Java Engineer");
    assert_eq!(out[0].location_text, "Noida");
}

#[test]
fn test_naukri_and_foundit_fixtures() {
    let naukri = SourceConfig::new("Naukri", "https://www.naukri.com/java-jobs");
    let html = r#"<article class="jobTuple bgWhite"><div class="info">
        <a class="title ellipsis" href="https://www.naukri.com/job-listings-java-1">Java Developer</a>
        <ul><li class="fleft location"><span>Kochi</span></li></ul></div></article>"#;
    let out = extract(ExtractorKind::Naukri, &naukri, html);
    assert_eq!(out[0].link_raw, "https://www.naukri.com/job-listings-java-1");
    assert_eq!(out[0].location_text, "Kochi");

    let foundit = SourceConfig::new("Monster", "https://www.foundit.in/search?query=java");
    let html = r#"<div class="job-tuple"><a class="title" href="/job/java-dev-7">Java Dev</a>
        <div class="details"><div class="location">Jaipur</div></div></div>"#;
    let out = extract(ExtractorKind::Foundit, &foundit, html);
    assert_eq!(out[0].source_id, "Monster");
    assert_eq!(out[0].link_raw, "/job/java-dev-7");
}

#[test]
fn test_structural_markers_absent() {
    let source = SourceConfig::new("Indeed", "https://www.indeed.com/jobs?q=java");
    let redesigned = r#"<main><ul class="jobs-v3"><li data-testid="card">Java Developer - Pune</li></ul></main>"#;
    for kind in [
        ExtractorKind::Indeed,
        ExtractorKind::Glassdoor,
        ExtractorKind::Naukri,
        ExtractorKind::Foundit,
    ] {
        assert!(extract(kind, &source, redesigned).is_empty());
    }
}

#[test]
fn test_garbage_document_yields_nothing() {
    let source = SourceConfig::new("Naukri", "https://www.naukri.com/java-jobs");
    let out = extract(ExtractorKind::Naukri, &source, "<<<%%% not html at all <article");
    assert!(out.is_empty());
}

#[test]
fn test_fallback_scans_links() {
    let source = SourceConfig::new("LinkedIn", "https://www.linkedin.com/jobs/search/?keywords=java");
    let html = r#"
        <nav><a href="/feed">Home</a><a href="/jobs">Jobs</a></nav>
        <ul>
          <li><a href="/jobs/view/java-engineer-at-acme-pune-1">Java Engineer</a></li>
          <li><a href="https://in.linkedin.com/jobs/view/2">Software Engineer (Chennai)</a></li>
          <li><a href="/jobs/view/3">Frontend Developer</a></li>
        </ul>"#;
    let out = extract(ExtractorKind::Fallback, &source, html);
    let titles: Vec<&str> = out.iter().map(|c| c.title_text.as_str()).collect();
    assert_eq!(titles, vec!["Java Engineer", "Software Engineer (Chennai)"]);

    let geo = GeoFilter::new(["india", "pune", "chennai"]);
    assert!(out.iter().all(|c| geo.matches(Some(c.location_text.as_str()))));
}

#[test]
fn test_custom_layout_from_config() {
    let kind: ExtractorKind = serde_json::from_str(
        r#"{"kind":"custom","card":"section.posting","title":"h3","location":"p.where","link":"a"}"#,
    )
    .unwrap();
    let source = SourceConfig::new("Board", "https://board.test/search").with_extractor(kind.clone());
    let html = r#"<section class="posting"><h3><a href="/p/9">Java Developer</a></h3><p class="where">Lucknow</p></section>"#;

    let out = extract(kind, &source, html);
    assert_eq!(
        out,
        vec![RawCandidate {
            title_text: "Java Developer".to_string(),
            link_raw: "/p/9".to_string(),
            location_text: "Lucknow".to_string(),
            source_id: "Board".to_string(),
        }]
    );
}

#[test]
fn test_card_layout_serialization() {
    let layout = CardLayout::new("div.card", "a.t", "span.l");
    let json = serde_json::to_string(&layout).unwrap();
    assert!(json.contains("\"card\":\"div.card\""));
    assert!(!json.contains("link"));
}
