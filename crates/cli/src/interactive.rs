//! Line-driven search loop
//!
//! Every line read is one trigger: it becomes the input's value and a search
//! starts at once, without waiting for earlier searches to finish.

use anyhow::{Context, Result};
use articlesearch_client::{SearchClient, SearchOutcome, SharedQuery};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info};

type JoinedSearch = std::result::Result<articlesearch_core::Result<SearchOutcome>, JoinError>;

/// Counts of what happened during an interactive session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub started: usize,
    pub rendered: usize,
    pub superseded: usize,
    pub failed: usize,
}

impl SessionSummary {
    fn record(&mut self, joined: JoinedSearch) {
        match joined {
            Ok(Ok(SearchOutcome::Rendered { count, took_ms })) => {
                self.rendered += 1;
                match took_ms {
                    Some(ms) => info!("Rendered {count} results (server took {ms} ms)"),
                    None => info!("Rendered {count} results"),
                }
            }
            Ok(Ok(SearchOutcome::Superseded)) => {
                self.superseded += 1;
                debug!("Dropped results of a superseded search");
            }
            Ok(Err(e)) => {
                self.failed += 1;
                error!("Search failed: {e}");
            }
            Err(e) => {
                self.failed += 1;
                error!("Search task failed: {e}");
            }
        }
    }
}

/// Run searches for each line of `reader` until end of input
///
/// Returns once every started search has completed.
pub async fn run_interactive<R>(
    client: Arc<SearchClient>,
    input: SharedQuery,
    reader: R,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut tasks = JoinSet::new();
    let mut summary = SessionSummary::default();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read query from input")?
    {
        input.set(line).await;

        let pending = match client.prepare().await {
            Ok(pending) => pending,
            Err(e) => {
                summary.failed += 1;
                error!("Search failed: {e}");
                continue;
            }
        };

        let client = client.clone();
        tasks.spawn(async move { client.execute(pending).await });
        summary.started += 1;

        while let Some(joined) = tasks.try_join_next() {
            summary.record(joined);
        }
    }

    while let Some(joined) = tasks.join_next().await {
        summary.record(joined);
    }

    Ok(summary)
}
