use fg_core::{FeedError, LoadMode, SearchQuery};

/// Arguments of one `load` call, kept for `retry_last`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub query: SearchQuery,
    pub page: u32,
    pub mode: LoadMode,
}

/// What happened to a `load` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Response merged into the feed.
    Applied,
    /// Response (or transport) failed; the feed is in `Error`.
    Failed(FeedError),
    /// Refused at the entry guard; no request was issued.
    Rejected(RejectReason),
    /// Response arrived after a newer load or teardown and was dropped.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("controller has been shut down")]
    Closed,

    #[error("another load is in flight")]
    Busy,

    #[error("no more pages")]
    NoMorePages,

    #[error("append must request page {expected}, got {requested}")]
    PageOutOfSequence { expected: u32, requested: u32 },

    #[error("append query does not match the active query")]
    QueryMismatch,

    #[error("no load has been attempted yet")]
    NothingToRetry,
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied)
    }
}
