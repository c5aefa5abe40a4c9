use async_trait::async_trait;

use crate::photo::Photo;

/// Single-slot persistence for the most recent feed snapshot.
#[async_trait]
pub trait PhotoCachePort: Send + Sync {
    /// Reads the snapshot.
    ///
    /// Error semantics:
    /// - missing key      : empty vec
    /// - corrupt blob     : empty vec
    /// - nothing is ever raised to the caller
    async fn read(&self) -> Vec<Photo>;

    /// Replaces the snapshot.
    ///
    /// Requirements:
    /// - fully replaces the previous snapshot, no merge
    /// - failures are logged and swallowed, no retry
    async fn write(&self, photos: &[Photo]);
}
