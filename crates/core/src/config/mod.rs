//! Configuration module for the articlesearch client
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML files and/or environment variables.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use crate::search_models::{SearchMode, SortOrder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.articlesearch/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".articlesearch").join("config.toml"))
}

/// What happens when a search is started while an earlier one is still pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Every response renders when it arrives; the last to arrive stays on screen (default)
    #[default]
    LastResponseWins,
    /// Responses to requests that are no longer the most recent are dropped
    LatestRequestWins,
}

/// Markup produced for each result block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderFormat {
    /// HTML blocks for a page results container (default)
    #[default]
    Html,
    /// Plain text for terminals
    Text,
    /// One JSON object per result
    Json,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Rendering configuration
    #[serde(default)]
    pub render: RenderConfig,
}

/// Configuration for the search client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Search endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Number of results requested per search
    #[serde(default = "default_topk")]
    pub topk: usize,

    /// Request timeout in seconds; unset means a request may stay pending forever
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Handling of overlapping searches
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,

    /// Retrieval mode sent to the backend; omitted from the request when unset
    #[serde(default)]
    pub mode: Option<SearchMode>,

    /// Sort order sent to the backend; omitted from the request when unset
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            topk: default_topk(),
            timeout_secs: None,
            overlap_policy: OverlapPolicy::default(),
            mode: None,
            sort: None,
        }
    }
}

/// Configuration for result rendering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub format: RenderFormat,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.client.endpoint.trim();
        let lower = endpoint.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(Error::config(format!(
                "client.endpoint must be an http(s) URL, got '{endpoint}'"
            )));
        }

        if self.client.topk == 0 {
            return Err(Error::config(
                "client.topk must be greater than 0".to_string(),
            ));
        }

        if self.client.timeout_secs == Some(0) {
            return Err(Error::config(
                "client.timeout_secs must be greater than 0 when set".to_string(),
            ));
        }

        Ok(())
    }
}
