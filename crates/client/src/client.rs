//! The search-and-render cycle

use crate::render::{HtmlRenderer, Renderer};
use crate::sequence::RequestSequencer;
use crate::sink::ResultsSink;
use crate::source::QuerySource;
use articlesearch_core::config::{ClientConfig, OverlapPolicy};
use articlesearch_core::error::{Error, Result};
use articlesearch_core::search_models::{SearchMode, SearchRequest, SearchResponse, SortOrder};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// What a completed `search()` call did to the results sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The sink was replaced with `count` blocks
    Rendered { count: usize, took_ms: Option<u64> },
    /// A newer search started before this response arrived; the sink was left alone
    Superseded,
}

/// A search whose query has been read but whose request has not been sent
#[derive(Debug, Clone)]
pub struct PendingSearch {
    ticket: u64,
    request: SearchRequest,
}

impl PendingSearch {
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }
}

/// Reads a query, posts it to the search endpoint, and renders the results
///
/// The client holds no per-search state, so one instance can run any number
/// of overlapping searches. Share it behind an `Arc` to spawn them.
pub struct SearchClient {
    http: Client,
    endpoint: String,
    topk: usize,
    mode: Option<SearchMode>,
    sort: Option<SortOrder>,
    overlap_policy: OverlapPolicy,
    source: Arc<dyn QuerySource>,
    sink: Arc<dyn ResultsSink>,
    renderer: Arc<dyn Renderer>,
    sequencer: RequestSequencer,
}

impl SearchClient {
    /// Create a client rendering HTML blocks into `sink`
    pub fn new(
        config: &ClientConfig,
        source: Arc<dyn QuerySource>,
        sink: Arc<dyn ResultsSink>,
    ) -> Result<Self> {
        info!("Initializing search client");
        info!("  Endpoint: {}", config.endpoint);
        info!("  Top-k: {}", config.topk);
        info!("  Overlap policy: {:?}", config.overlap_policy);
        if let Some(secs) = config.timeout_secs {
            info!("  Timeout: {secs}s");
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            topk: config.topk,
            mode: config.mode,
            sort: config.sort,
            overlap_policy: config.overlap_policy,
            source,
            sink,
            renderer: Arc::new(HtmlRenderer),
            sequencer: RequestSequencer::default(),
        })
    }

    /// Use a different renderer for result blocks
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one query → request → render cycle
    ///
    /// The query is sent exactly as the source returns it. On any failure
    /// (missing input, network, undecodable body) the sink keeps its previous
    /// content. Overlapping calls are never cancelled; see [`OverlapPolicy`]
    /// for which response ends up in the sink.
    pub async fn search(&self) -> Result<SearchOutcome> {
        let pending = self.prepare().await?;
        self.execute(pending).await
    }

    /// Read the current query and register the search as started
    ///
    /// Split from [`SearchClient::execute`] so a caller can capture the input
    /// immediately and run the request later, e.g. on a spawned task.
    pub async fn prepare(&self) -> Result<PendingSearch> {
        let query = self.source.current_query().await?;
        let ticket = self.sequencer.begin();

        let request = SearchRequest::new(query)
            .with_topk(self.topk)
            .with_mode(self.mode)
            .with_sort(self.sort);

        debug!(
            "Search #{ticket}: query={:?} topk={}",
            request.query, request.topk
        );

        Ok(PendingSearch { ticket, request })
    }

    /// Send a prepared search and render its response
    pub async fn execute(&self, pending: PendingSearch) -> Result<SearchOutcome> {
        let PendingSearch { ticket, request } = pending;
        let response = self.post(&request).await?;

        let Some(count) = self.render(ticket, &response) else {
            debug!("Search #{ticket} superseded by a newer request, dropping response");
            return Ok(SearchOutcome::Superseded);
        };
        debug!("Search #{ticket}: rendered {count} results");

        Ok(SearchOutcome::Rendered {
            count,
            took_ms: response.took_ms,
        })
    }

    async fn post(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connection"
                } else if e.is_request() {
                    "request build"
                } else if e.is_body() {
                    "body"
                } else {
                    "unknown"
                };
                Error::network(format!(
                    "Search request to {} failed ({error_kind}): {e}",
                    self.endpoint
                ))
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::network(format!("Failed to read search response: {e}")))?;

        SearchResponse::from_slice(&body).map_err(|e| {
            if status.is_success() {
                e
            } else {
                e.with_http_status(status.as_u16())
            }
        })
    }

    /// Replace the sink with the rendered results, or return `None` when the
    /// overlap policy drops this response
    fn render(&self, ticket: u64, response: &SearchResponse) -> Option<usize> {
        let blocks: Vec<String> = response
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| self.renderer.render(index, result))
            .collect();
        let count = blocks.len();

        match self.overlap_policy {
            OverlapPolicy::LastResponseWins => {
                self.sink.replace(blocks);
                Some(count)
            }
            // Checked inside the sink's lock so a newer render cannot slip in between
            OverlapPolicy::LatestRequestWins => self
                .sink
                .replace_if(blocks, &|| self.sequencer.is_latest(ticket))
                .then_some(count),
        }
    }
}
