use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A live alias → URL mapping. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub alias: String,
    pub full_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    pub fn new(alias: impl Into<String>, full_url: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            full_url: full_url.into(),
            created_at: Utc::now(),
        }
    }

    /// Public short URL for this mapping under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.alias)
    }
}

/// Result of an atomic insert-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The alias is live or retired.
    Taken,
}
