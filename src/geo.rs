//! Geography filter
//!
//! Case-insensitive substring match against a fixed set of target-region
//! tokens. This predicate alone decides inclusion.
//!
//! Text and tokens are both folded through uppercase then lowercase, so
//! characters whose uppercase form is ASCII (`ı`, `ſ`, the Kelvin sign)
//! compare the same before and after uppercasing.

/// Decides whether free text names a place in the target region
#[derive(Debug, Clone)]
pub struct GeoFilter {
    tokens: Vec<String>,
}

impl GeoFilter {
    /// Build a filter from location tokens (country plus major cities)
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|t| fold(t.as_ref().trim()))
            .filter(|t| !t.is_empty())
            .collect();
        Self { tokens }
    }

    /// True when `text` contains any token. Absent or empty text never matches.
    pub fn matches(&self, text: Option<&str>) -> bool {
        let text = match text {
            Some(t) if !t.is_empty() => fold(t),
            _ => return false,
        };
        self.tokens.iter().any(|token| text.contains(token.as_str()))
    }

    /// Normalized tokens
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

fn fold(text: &str) -> String {
    text.to_uppercase().to_lowercase()
}
