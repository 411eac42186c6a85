//! Library interface for the articlesearch CLI
//!
//! This module exposes the pieces of the binary that integration tests need,
//! keeping argument parsing and process setup in main.rs.

pub mod interactive;

use anyhow::{Context, Result};
use articlesearch_client::{renderer_for, QuerySource, ResultsSink, SearchClient};
use articlesearch_core::config::{Config, RenderFormat};
use articlesearch_core::{SearchMode, SortOrder};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Settings given on the command line, applied on top of the loaded config
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub topk: Option<usize>,
    pub mode: Option<SearchMode>,
    pub sort: Option<SortOrder>,
    pub format: Option<RenderFormat>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.client.endpoint = endpoint.clone();
        }
        if let Some(topk) = self.topk {
            config.client.topk = topk;
        }
        if self.mode.is_some() {
            config.client.mode = self.mode;
        }
        if self.sort.is_some() {
            config.client.sort = self.sort;
        }
        if let Some(format) = self.format {
            config.render.format = format;
        }
    }
}

/// Load the layered config, apply command-line overrides, and validate
pub fn load_config(config_path: Option<&Path>, overrides: &Overrides) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load configuration")?;
    overrides.apply(&mut config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Build a search client rendering in the configured format
pub fn build_client(
    config: &Config,
    source: Arc<dyn QuerySource>,
    sink: Arc<dyn ResultsSink>,
) -> Result<SearchClient> {
    let client = SearchClient::new(&config.client, source, sink)
        .context("Failed to create search client")?
        .with_renderer(renderer_for(config.render.format));
    Ok(client)
}

/// Log filter from `RUST_LOG`, falling back to this tool's crates at `info`
/// (`debug` when verbose)
pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!(
            "articlesearch={level},articlesearch_client={level},articlesearch_core={level}"
        ))
    })
}
