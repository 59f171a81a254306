//! Request and response bodies of the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::UrlMapping;

/// `POST /shorten`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// Missing or null is treated as empty and rejected as an invalid URL.
    #[serde(default)]
    pub full_url: Option<String>,
    #[serde(default)]
    pub custom_alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    pub alias: String,
    pub full_url: String,
}

impl ShortenResponse {
    pub fn from_mapping(mapping: UrlMapping, base_url: &str) -> Self {
        Self {
            short_url: mapping.short_url(base_url),
            alias: mapping.alias,
            full_url: mapping.full_url,
        }
    }
}

/// One element of `GET /urls`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlEntry {
    pub alias: String,
    pub short_url: String,
    pub full_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlEntry {
    pub fn from_mapping(mapping: UrlMapping, base_url: &str) -> Self {
        Self {
            short_url: mapping.short_url(base_url),
            alias: mapping.alias,
            full_url: mapping.full_url,
            created_at: mapping.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_request_camel_case() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"fullUrl":"https://a.b","customAlias":"x-y"}"#).unwrap();
        assert_eq!(req.full_url.as_deref(), Some("https://a.b"));
        assert_eq!(req.custom_alias.as_deref(), Some("x-y"));
    }

    #[test]
    fn test_shorten_request_nulls_and_missing() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"fullUrl":null,"customAlias":null}"#).unwrap();
        assert!(req.full_url.is_none());
        assert!(req.custom_alias.is_none());

        let req: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(req.full_url.is_none());
    }

    #[test]
    fn test_url_entry_serializes_camel_case() {
        let mapping = UrlMapping::new("abc", "https://example.com");
        let value = serde_json::to_value(UrlEntry::from_mapping(mapping, "http://s.io")).unwrap();
        assert_eq!(value["alias"], "abc");
        assert_eq!(value["shortUrl"], "http://s.io/abc");
        assert_eq!(value["fullUrl"], "https://example.com");
        assert!(value.get("createdAt").is_some());
    }
}
