//! Core types for the articlesearch client
//!
//! This crate provides the foundational pieces shared by the client library
//! and the command-line frontend:
//!
//! - **Search models**: the request/response wire contract of the search API
//! - **Configuration**: layered client configuration
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod error;
pub mod search_models;

// Re-export main types for convenience
pub use config::{ClientConfig, Config, OverlapPolicy, RenderConfig, RenderFormat};
pub use error::{Error, Result};
pub use search_models::{
    SearchMode, SearchRequest, SearchResponse, SearchResult, SortOrder, DEFAULT_ENDPOINT,
    DEFAULT_TOPK,
};
