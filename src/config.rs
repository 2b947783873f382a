//! Monitor configuration
//!
//! Everything the pipeline needs is carried in an explicit [`MonitorConfig`]
//! value handed to each component at construction. Defaults reproduce the
//! hourly Java-developer search across five Indian job boards.
//!
//! # Environment Variables
//!
//! - `JOB_SCOUT_WEBHOOK_URL`: digest delivery endpoint
//! - `JOB_SCOUT_QUERY`: overrides the descriptive search query

use std::collections::HashSet;
use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};
use crate::extraction::ExtractorKind;

/// Default cap on title length, in characters
pub const DEFAULT_MAX_TITLE_CHARS: usize = 120;

/// Default cap on digest entries
pub const DEFAULT_DIGEST_LIMIT: usize = 15;

/// Default outreach template. `{title}` and `{source}` are substituted.
pub const DEFAULT_OUTREACH_TEMPLATE: &str = "I came across the '{title}' role on {source}, and it aligns well with my Java backend experience. I\u{2019}d appreciate the opportunity to discuss how I could contribute to this position.";

const DEFAULT_LOCATIONS: &[&str] = &[
    "india",
    "bangalore",
    "bengaluru",
    "mumbai",
    "delhi",
    "noida",
    "gurgaon",
    "hyderabad",
    "chennai",
    "pune",
    "kolkata",
    "ahmedabad",
    "coimbatore",
    "jaipur",
    "surat",
    "visakhapatnam",
    "bhubaneswar",
    "indore",
    "lucknow",
    "kanpur",
    "nagpur",
    "thiruvananthapuram",
    "kochi",
];

const DEFAULT_KEYWORDS: &[&str] = &["java", "backend", "developer", "engineer"];

/// One job-listing source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Display name and strategy key, e.g. "Indeed"
    pub source_id: String,
    /// Search page fetched each run; also the fallback link
    pub search_url: String,
    /// Base for resolving relative hrefs (defaults to the search URL's origin)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Explicit extraction strategy (defaults to one resolved from `source_id`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<ExtractorKind>,
}

impl SourceConfig {
    /// Create a source with derived base URL and extractor
    pub fn new(source_id: impl Into<String>, search_url: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            search_url: search_url.into(),
            base_url: None,
            extractor: None,
        }
    }

    /// Set an explicit base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set an explicit extraction strategy
    pub fn with_extractor(mut self, extractor: ExtractorKind) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Base URL relative hrefs are resolved against.
    ///
    /// Path conventions differ per site, so each source carries its own base.
    /// Without one, the origin of `search_url` is used; if that does not
    /// parse either, `search_url` itself is returned.
    pub fn base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            return base.clone();
        }
        match Url::parse(&self.search_url) {
            Ok(url) => url.origin().ascii_serialization(),
            Err(_) => self.search_url.clone(),
        }
    }

    /// Strategy used to extract candidates from this source
    pub fn extractor_kind(&self) -> ExtractorKind {
        self.extractor
            .clone()
            .unwrap_or_else(|| ExtractorKind::for_source(&self.source_id))
    }
}

/// HTTP fetch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent to every source
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Human-readable role query the source URLs encode
    pub search_query: String,
    /// Sources, processed in this order
    pub sources: Vec<SourceConfig>,
    /// Target-region tokens for the geography filter
    pub locations: Vec<String>,
    /// Relevance keywords gating the fallback extractor
    pub keywords: Vec<String>,
    /// Title truncation cap, in characters
    pub max_title_chars: usize,
    /// Maximum digest entries
    pub digest_limit: usize,
    /// Digest subject line
    pub digest_subject: String,
    /// Outreach template with `{title}` and `{source}` placeholders
    pub outreach_template: String,
    /// HTTP fetch settings
    pub fetch: FetchConfig,
    /// Webhook receiving the digest, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            search_query: "java developer 3 years".to_string(),
            sources: vec![
                SourceConfig::new(
                    "LinkedIn",
                    "https://www.linkedin.com/jobs/search/?keywords=java%20developer%203%20years",
                ),
                SourceConfig::new("Indeed", "https://www.indeed.com/jobs?q=java+developer+3+years"),
                SourceConfig::new(
                    "Glassdoor",
                    "https://www.glassdoor.co.in/Job/java-developer-3-years-jobs-SRCH_KO0,25.htm",
                ),
                SourceConfig::new("Naukri", "https://www.naukri.com/java-developer-3-years-jobs"),
                SourceConfig::new(
                    "Monster",
                    "https://www.foundit.in/search?query=java%20developer%203%20years",
                ),
            ],
            locations: DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            max_title_chars: DEFAULT_MAX_TITLE_CHARS,
            digest_limit: DEFAULT_DIGEST_LIMIT,
            digest_subject: "Hourly Java Developer Job Updates".to_string(),
            outreach_template: DEFAULT_OUTREACH_TEMPLATE.to_string(),
            fetch: FetchConfig::default(),
            webhook_url: None,
        }
    }
}

impl MonitorConfig {
    /// Load a JSON config file; omitted fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Load from `path` (or defaults), apply env overrides, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        }
        .apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `JOB_SCOUT_*` environment overrides
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = env::var("JOB_SCOUT_WEBHOOK_URL") {
            if !url.trim().is_empty() {
                self.webhook_url = Some(url);
            }
        }
        if let Ok(query) = env::var("JOB_SCOUT_QUERY") {
            if !query.trim().is_empty() {
                self.search_query = query;
            }
        }
        self
    }

    /// Check invariants the pipeline relies on
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::EmptySources);
        }
        if self.max_title_chars == 0 {
            return Err(ConfigError::Invalid(
                "max_title_chars must be greater than zero".to_string(),
            ));
        }
        if self.digest_limit == 0 {
            return Err(ConfigError::Invalid(
                "digest_limit must be greater than zero".to_string(),
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch.timeout_secs must be greater than zero".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.search_url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "source '{}' has an empty search_url",
                    source.source_id
                )));
            }
            if !seen.insert(source.source_id.to_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate source id '{}'",
                    source.source_id
                )));
            }
        }

        if let Some(url) = &self.webhook_url {
            Url::parse(url)
                .map_err(|e| ConfigError::Invalid(format!("webhook_url '{}': {}", url, e)))?;
        }

        Ok(())
    }

    /// Look up a source by id, case-insensitively
    pub fn source(&self, source_id: &str) -> Option<&SourceConfig> {
        self.sources
            .iter()
            .find(|s| s.source_id.eq_ignore_ascii_case(source_id))
    }
}
