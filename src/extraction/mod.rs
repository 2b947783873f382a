//! Listing extraction module
//!
//! Every source publishes listings in its own unstable markup. Each source
//! gets a dedicated [`ListingExtractor`] that owns its structural knowledge;
//! anything without one goes through the link-scanning [`FallbackExtractor`].
//!
//! Missing structure is never an error here: a redesigned page yields zero
//! candidates. Errors are reserved for selectors that cannot be compiled.

pub mod boards;
pub mod cards;
pub mod links;

pub use boards::{FounditExtractor, GlassdoorExtractor, IndeedExtractor, NaukriExtractor};
pub use cards::{CardExtractor, CardLayout};
pub use links::FallbackExtractor;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::config::SourceConfig;
use crate::error::ExtractionError;

/// An unfiltered, unnormalized extraction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    /// Visible title text
    pub title_text: String,
    /// href as found in the markup; may be relative or empty
    pub link_raw: String,
    /// Text the geography filter is evaluated on
    pub location_text: String,
    /// Source the candidate came from
    pub source_id: String,
}

/// Converts a parsed document into raw candidates
pub trait ListingExtractor: Send + Sync {
    /// Short strategy name for logs
    fn name(&self) -> &'static str;

    /// Extract every candidate the strategy recognizes
    fn extract(
        &self,
        document: &Html,
        source: &SourceConfig,
    ) -> Result<Vec<RawCandidate>, ExtractionError>;
}

/// Closed set of extraction strategies, tagged by source identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractorKind {
    /// indeed.com result cards
    Indeed,
    /// glassdoor.co.in result list
    Glassdoor,
    /// naukri.com job tuples
    Naukri,
    /// foundit.in (formerly Monster India) job tuples
    Foundit,
    /// Card layout supplied by configuration
    Custom(CardLayout),
    /// Scan every hyperlink, gated by relevance keywords
    Fallback,
}

impl ExtractorKind {
    /// Strategy registered for a source id, or [`ExtractorKind::Fallback`]
    pub fn for_source(source_id: &str) -> Self {
        match source_id.trim().to_ascii_lowercase().as_str() {
            "indeed" => Self::Indeed,
            "glassdoor" => Self::Glassdoor,
            "naukri" => Self::Naukri,
            "monster" | "foundit" => Self::Foundit,
            _ => Self::Fallback,
        }
    }

    /// Instantiate the strategy. Only the fallback consumes `keywords`.
    pub fn build(&self, keywords: &[String]) -> Box<dyn ListingExtractor> {
        match self {
            Self::Indeed => Box::new(IndeedExtractor),
            Self::Glassdoor => Box::new(GlassdoorExtractor),
            Self::Naukri => Box::new(NaukriExtractor),
            Self::Foundit => Box::new(FounditExtractor),
            Self::Custom(layout) => Box::new(CardExtractor::new(layout.clone())),
            Self::Fallback => Box::new(FallbackExtractor::new(keywords)),
        }
    }

    /// Strategy name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Indeed => "indeed",
            Self::Glassdoor => "glassdoor",
            Self::Naukri => "naukri",
            Self::Foundit => "foundit",
            Self::Custom(_) => "custom",
            Self::Fallback => "fallback",
        }
    }
}

/// Compile a CSS selector, keeping the offending input in the error
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector)
        .map_err(|e| ExtractionError::InvalidSelector(format!("{}: {}", selector, e)))
}

/// Visible text of an element with whitespace collapsed
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
