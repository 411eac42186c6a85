//! Search client for the article search API
//!
//! This crate reads a query from an injected [`QuerySource`], posts it to the
//! search endpoint, and replaces the contents of an injected [`ResultsSink`]
//! with one rendered block per returned article.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod client;
pub mod render;
mod sequence;
pub mod sink;
pub mod source;

pub use client::{PendingSearch, SearchClient, SearchOutcome};
pub use render::{
    escape_html, format_similarity, renderer_for, HtmlRenderer, JsonRenderer, Renderer,
    TextRenderer,
};
pub use sink::{BufferSink, ResultsSink, WriterSink};
pub use source::{QuerySource, SharedQuery, StaticQuery};

pub use articlesearch_core::config::{ClientConfig, OverlapPolicy, RenderFormat};
pub use articlesearch_core::error::{Error, Result};
