//! Query sources
//!
//! A [`QuerySource`] stands in for the query input field: it is asked for the
//! current raw text each time a search starts. Values are handed over exactly
//! as stored, without trimming.

use articlesearch_core::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Supplies the current query text
#[async_trait]
pub trait QuerySource: Send + Sync {
    /// Return the current raw query value
    ///
    /// Fails with [`Error::MissingInput`] when the input is unavailable.
    async fn current_query(&self) -> Result<String>;
}

/// A fixed query, e.g. one taken from the command line
#[derive(Debug, Clone)]
pub struct StaticQuery(String);

impl StaticQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }
}

#[async_trait]
impl QuerySource for StaticQuery {
    async fn current_query(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// A shared, editable input value
///
/// Clones share the same value. A detached input models a field that is not
/// present at all and fails every read.
#[derive(Debug, Clone, Default)]
pub struct SharedQuery {
    value: Arc<RwLock<Option<String>>>,
}

impl SharedQuery {
    /// Create an input holding `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: Arc::new(RwLock::new(Some(initial.into()))),
        }
    }

    /// Create an input that is not attached to anything
    pub fn detached() -> Self {
        Self::default()
    }

    /// Replace the input's value
    pub async fn set(&self, query: impl Into<String>) {
        *self.value.write().await = Some(query.into());
    }

    /// Detach the input; subsequent reads fail
    pub async fn detach(&self) {
        *self.value.write().await = None;
    }
}

#[async_trait]
impl QuerySource for SharedQuery {
    async fn current_query(&self) -> Result<String> {
        self.value
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::missing_input("query input is not attached"))
    }
}
