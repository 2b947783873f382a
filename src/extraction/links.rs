//! Fallback link extraction
//!
//! Used for boards without a dedicated layout, or where card boundaries are
//! meaningless (LinkedIn's guest search). Every hyperlink is a candidate if
//! its text mentions a relevance keyword. Non-job links that mention a
//! keyword, and job titles phrased without one, are the accepted error mode.

use scraper::Html;
use tracing::{debug, instrument};

use super::{element_text, parse_selector, ListingExtractor, RawCandidate};
use crate::config::SourceConfig;
use crate::error::ExtractionError;

/// Structure-agnostic extractor scanning `a[href]` elements
#[derive(Debug, Clone)]
pub struct FallbackExtractor {
    keywords: Vec<String>,
}

impl FallbackExtractor {
    /// Build with relevance keywords (matched case-insensitively)
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    fn is_relevant(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

impl ListingExtractor for FallbackExtractor {
    fn name(&self) -> &'static str {
        "fallback"
    }

    #[instrument(skip(self, document, source), fields(source = %source.source_id))]
    fn extract(
        &self,
        document: &Html,
        source: &SourceConfig,
    ) -> Result<Vec<RawCandidate>, ExtractionError> {
        let anchors = parse_selector("a[href]")?;
        let mut candidates = Vec::new();
        let mut scanned = 0usize;

        for anchor in document.select(&anchors) {
            scanned += 1;
            let text = element_text(&anchor);
            if text.is_empty() || !self.is_relevant(&text) {
                continue;
            }
            let href = anchor.value().attr("href").unwrap_or_default().trim();

            // The anchor is both title and location; the href often carries
            // the city slug, so it is offered to the filter as well.
            let location_text = if href.is_empty() {
                text.clone()
            } else {
                format!("{} {}", text, href)
            };

            candidates.push(RawCandidate {
                title_text: text,
                link_raw: href.to_string(),
                location_text,
                source_id: source.source_id.clone(),
            });
        }

        debug!(
            "{}: {} of {} links passed the keyword gate",
            source.source_id,
            candidates.len(),
            scanned
        );
        Ok(candidates)
    }
}
