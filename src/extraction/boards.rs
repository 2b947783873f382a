//! Dedicated extractors for known job boards
//!
//! Each board's markup changes independently, so each extractor keeps its
//! own selectors. When a board redesigns, its card selector stops matching
//! and the extractor yields nothing until the layout here is updated (or a
//! `custom` layout is configured for that source).

use scraper::Html;
use tracing::instrument;

use super::{CardLayout, ListingExtractor, RawCandidate};
use crate::config::SourceConfig;
use crate::error::ExtractionError;

/// indeed.com: the href sits on an anchor nested in the `h2` title
#[derive(Debug, Clone, Copy, Default)]
pub struct IndeedExtractor;

impl IndeedExtractor {
    fn layout() -> CardLayout {
        CardLayout::new("div.job_seen_beacon", "h2.jobTitle", "div.companyLocation").with_link("a")
    }
}

impl ListingExtractor for IndeedExtractor {
    fn name(&self) -> &'static str {
        "indeed"
    }

    #[instrument(skip(self, document, source), fields(source = %source.source_id))]
    fn extract(
        &self,
        document: &Html,
        source: &SourceConfig,
    ) -> Result<Vec<RawCandidate>, ExtractionError> {
        Self::layout().extract(document, &source.source_id)
    }
}

/// glassdoor.co.in: list items with a `jobLink` anchor as title
#[derive(Debug, Clone, Copy, Default)]
pub struct GlassdoorExtractor;

impl GlassdoorExtractor {
    fn layout() -> CardLayout {
        CardLayout::new("li.react-job-listing", "a.jobLink", "span.jobLocation")
    }
}

impl ListingExtractor for GlassdoorExtractor {
    fn name(&self) -> &'static str {
        "glassdoor"
    }

    #[instrument(skip(self, document, source), fields(source = %source.source_id))]
    fn extract(
        &self,
        document: &Html,
        source: &SourceConfig,
    ) -> Result<Vec<RawCandidate>, ExtractionError> {
        Self::layout().extract(document, &source.source_id)
    }
}

/// naukri.com: `article.jobTuple` with location in a list item
#[derive(Debug, Clone, Copy, Default)]
pub struct NaukriExtractor;

impl NaukriExtractor {
    fn layout() -> CardLayout {
        CardLayout::new("article.jobTuple", "a.title", "li.location")
    }
}

impl ListingExtractor for NaukriExtractor {
    fn name(&self) -> &'static str {
        "naukri"
    }

    #[instrument(skip(self, document, source), fields(source = %source.source_id))]
    fn extract(
        &self,
        document: &Html,
        source: &SourceConfig,
    ) -> Result<Vec<RawCandidate>, ExtractionError> {
        Self::layout().extract(document, &source.source_id)
    }
}

/// foundit.in (Monster India)
#[derive(Debug, Clone, Copy, Default)]
pub struct FounditExtractor;

impl FounditExtractor {
    fn layout() -> CardLayout {
        CardLayout::new("div.job-tuple", "a.title", "div.location")
    }
}

impl ListingExtractor for FounditExtractor {
    fn name(&self) -> &'static str {
        "foundit"
    }

    #[instrument(skip(self, document, source), fields(source = %source.source_id))]
    fn extract(
        &self,
        document: &Html,
        source: &SourceConfig,
    ) -> Result<Vec<RawCandidate>, ExtractionError> {
        Self::layout().extract(document, &source.source_id)
    }
}
