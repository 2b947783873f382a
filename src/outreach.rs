//! Outreach notes and the digest
//!
//! The composer is pure text templating; titles are inserted verbatim and
//! any escaping is left to the sink's transport.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::normalize::JobRecord;

/// Renders one personalized note per record
#[derive(Debug, Clone)]
pub struct OutreachComposer {
    template: String,
}

impl OutreachComposer {
    /// Template placeholders: `{title}` and `{source}`
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Compose the note for `record`
    pub fn compose(&self, record: &JobRecord) -> String {
        // Substitute source first so a title containing "{source}" stays literal.
        self.template
            .replace("{source}", &record.source)
            .replace("{title}", &record.title)
    }
}

/// A record paired with its outreach note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestEntry {
    /// Canonical record
    pub record: JobRecord,
    /// Outreach note
    pub message: String,
}

/// Everything one run hands to the notification sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    /// Subject line
    pub subject: String,
    /// When the digest was composed
    pub generated_at: DateTime<Local>,
    /// Capped, ordered entries
    pub entries: Vec<DigestEntry>,
}

impl Digest {
    /// Plain-text body: timestamped header, then one block per entry
    pub fn body(&self) -> String {
        let mut body = format!(
            "{} ({})\n\n",
            self.subject,
            self.generated_at.format("%Y-%m-%d %H:%M")
        );
        for entry in &self.entries {
            body.push_str(&format!(
                "\u{2022} {}\n{}\nOutreach message: {}\n\n",
                entry.record.title, entry.record.link, entry.message
            ));
        }
        body
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
