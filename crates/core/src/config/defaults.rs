//! Default values and functions for configuration

use crate::search_models::{DEFAULT_ENDPOINT, DEFAULT_TOPK};

pub(crate) fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

pub(crate) fn default_topk() -> usize {
    DEFAULT_TOPK
}

pub(crate) fn default_overlap_policy() -> &'static str {
    "last_response_wins"
}

pub(crate) fn default_render_format() -> &'static str {
    "html"
}
