//! Card-based extraction
//!
//! Most boards render one "card" element per listing with a title and a
//! location inside it. A [`CardLayout`] names those three pieces plus where
//! the href lives; [`CardExtractor`] walks a document with it.

use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{element_text, parse_selector, ListingExtractor, RawCandidate};
use crate::config::SourceConfig;
use crate::error::ExtractionError;

/// Selectors describing one board's listing cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLayout {
    /// Selects each listing card in the document
    pub card: String,
    /// Selects the title element within a card
    pub title: String,
    /// Selects the location element within a card
    pub location: String,
    /// Selects the anchor within the title element. `None` means the title
    /// element is itself the anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl CardLayout {
    /// Layout whose title element carries the href
    pub fn new(card: &str, title: &str, location: &str) -> Self {
        Self {
            card: card.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            link: None,
        }
    }

    /// Look for the href on a descendant of the title element
    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    /// Walk every card in `document`.
    ///
    /// Cards missing a title or a location element are skipped: without
    /// location text the geography filter cannot be evaluated.
    pub fn extract(
        &self,
        document: &Html,
        source_id: &str,
    ) -> Result<Vec<RawCandidate>, ExtractionError> {
        let card_sel = parse_selector(&self.card)?;
        let title_sel = parse_selector(&self.title)?;
        let location_sel = parse_selector(&self.location)?;
        let link_sel = self.link.as_deref().map(parse_selector).transpose()?;

        let mut candidates = Vec::new();
        let mut skipped = 0usize;

        for card in document.select(&card_sel) {
            let (Some(title_el), Some(location_el)) = (
                card.select(&title_sel).next(),
                card.select(&location_sel).next(),
            ) else {
                skipped += 1;
                continue;
            };

            let title_text = element_text(&title_el);
            if title_text.is_empty() {
                skipped += 1;
                continue;
            }

            let href = match &link_sel {
                Some(sel) => title_el
                    .select(sel)
                    .next()
                    .and_then(|a| a.value().attr("href")),
                None => title_el.value().attr("href"),
            };

            candidates.push(RawCandidate {
                title_text,
                link_raw: href.unwrap_or_default().trim().to_string(),
                location_text: element_text(&location_el),
                source_id: source_id.to_string(),
            });
        }

        debug!(
            "{}: {} cards extracted, {} incomplete skipped",
            source_id,
            candidates.len(),
            skipped
        );
        Ok(candidates)
    }
}

/// Extractor driven by a configured [`CardLayout`]
#[derive(Debug, Clone)]
pub struct CardExtractor {
    layout: CardLayout,
}

impl CardExtractor {
    /// Wrap a layout
    pub fn new(layout: CardLayout) -> Self {
        Self { layout }
    }
}

impl ListingExtractor for CardExtractor {
    fn name(&self) -> &'static str {
        "custom"
    }

    #[instrument(skip(self, document, source), fields(source = %source.source_id))]
    fn extract(
        &self,
        document: &Html,
        source: &SourceConfig,
    ) -> Result<Vec<RawCandidate>, ExtractionError> {
        self.layout.extract(document, &source.source_id)
    }
}
