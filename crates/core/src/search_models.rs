//! Request and response models for the article search API
//!
//! These types form the wire contract between the client and the search
//! backend. The client trusts the server's shape: only the documented fields
//! are read and anything extra is ignored.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/search";

/// Number of results requested per search
pub const DEFAULT_TOPK: usize = 10;

/// Retrieval strategy understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Semantic,
    Keyword,
    Hybrid,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Semantic => "semantic",
            Self::Keyword => "keyword",
            Self::Hybrid => "hybrid",
        };
        f.write_str(s)
    }
}

impl FromStr for SearchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "semantic" => Ok(Self::Semantic),
            "keyword" => Ok(Self::Keyword),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(Error::invalid_input(format!(
                "Unknown search mode '{other}'. Valid modes: semantic, keyword, hybrid"
            ))),
        }
    }
}

/// Result ordering understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Relevance,
    Newest,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Relevance => "relevance",
            Self::Newest => "newest",
        };
        f.write_str(s)
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "newest" => Ok(Self::Newest),
            other => Err(Error::invalid_input(format!(
                "Unknown sort order '{other}'. Valid orders: relevance, newest"
            ))),
        }
    }
}

/// Body of a search request
///
/// `mode` and `sort` are left out of the JSON entirely when unset, so the
/// default body is exactly `{"query":"...","topk":10}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub topk: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

impl SearchRequest {
    /// Create a request for the raw query text with the default `topk`
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            topk: DEFAULT_TOPK,
            mode: None,
            sort: None,
        }
    }

    pub fn with_topk(mut self, topk: usize) -> Self {
        self.topk = topk;
        self
    }

    pub fn with_mode(mut self, mode: Option<SearchMode>) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort;
        self
    }
}

/// One article returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub category: String,
    pub source: String,
    pub summary: String,
    /// Relevance score; hybrid/keyword backends report it as `score`
    #[serde(alias = "score")]
    pub similarity: f64,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub published: Option<String>,
}

/// Body of a search response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub took_ms: Option<u64>,
}

/// Lenient view of the body used for decoding, so a backend error object can
/// be told apart from a body that is simply missing `results`
#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
    #[serde(default, deserialize_with = "lenient")]
    took_ms: Option<u64>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// Decode an optional field, treating a value of the wrong type as absent
///
/// Only `results` and the core result fields may fail a response.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Text of a backend error field; non-string values keep their JSON form
fn error_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl SearchResponse {
    /// Decode a response body
    ///
    /// Fails when the body is not JSON or carries no `results` array. A body
    /// of the form `{"error": ..., "details": ...}` becomes [`Error::Server`].
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let raw: RawSearchResponse =
            serde_json::from_slice(body).map_err(|e| Error::decode(e.to_string()))?;

        match (raw.results, error_text(raw.error)) {
            (Some(results), _) => Ok(Self {
                results,
                took_ms: raw.took_ms,
            }),
            (None, Some(error)) => Err(Error::server(error, error_text(raw.details))),
            (None, None) => Err(Error::decode("missing field `results`")),
        }
    }
}
