//! Record normalization
//!
//! Turns a [`RawCandidate`] that passed the geography filter into a
//! canonical [`JobRecord`]: title truncated, link absolute, source tagged.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::SourceConfig;
use crate::extraction::RawCandidate;

/// Canonical unit of output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRecord {
    /// Title, at most `max_title_chars` characters
    pub title: String,
    /// Absolute URL, or the source's search URL when none was discoverable
    pub link: String,
    /// Source id
    pub source: String,
}

/// Builds [`JobRecord`]s from raw candidates
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_title_chars: usize,
}

impl Normalizer {
    /// Create a normalizer truncating titles to `max_title_chars`
    pub fn new(max_title_chars: usize) -> Self {
        Self { max_title_chars }
    }

    /// Normalize one candidate. No ellipsis is added on truncation.
    pub fn normalize(&self, raw: RawCandidate, source: &SourceConfig) -> JobRecord {
        let title = raw
            .title_text
            .trim()
            .chars()
            .take(self.max_title_chars)
            .collect();

        JobRecord {
            title,
            link: resolve_link(&raw.link_raw, source),
            source: raw.source_id,
        }
    }
}

/// True for `http`/`https` URLs
pub fn is_absolute(link: &str) -> bool {
    matches!(Url::parse(link), Ok(url) if matches!(url.scheme(), "http" | "https"))
}

/// Resolve an href found on a source's page.
///
/// Empty hrefs and hrefs that cannot be joined onto the source's base URL
/// fall back to the source's search URL.
pub fn resolve_link(link_raw: &str, source: &SourceConfig) -> String {
    let link_raw = link_raw.trim();
    if link_raw.is_empty() {
        return source.search_url.clone();
    }
    if is_absolute(link_raw) {
        return link_raw.to_string();
    }

    let base = source.base_url();
    match Url::parse(&base).and_then(|b| b.join(link_raw)) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url.to_string(),
        _ => {
            debug!(
                "{}: unresolvable link '{}' against '{}', using search URL",
                source.source_id, link_raw, base
            );
            source.search_url.clone()
        }
    }
}
