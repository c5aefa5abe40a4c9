use thiserror::Error;

/// Snapshot cache failure.
///
/// Never crosses the cache adapter boundary: adapters log it and degrade to
/// empty-cache behaviour.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsupported snapshot schema {found}, expected {expected}")]
    Schema { found: u32, expected: u32 },
}
