use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing request numbers and remembers the latest one
#[derive(Debug, Default)]
pub(crate) struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Register a new request and return its number
    pub(crate) fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` is still the most recently started request
    pub(crate) fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
