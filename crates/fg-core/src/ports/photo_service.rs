use async_trait::async_trait;

use crate::feed::{FeedError, PageRequest, PhotoPage};
use crate::ids::PhotoId;
use crate::photo::PhotoDetail;

/// Remote photo service.
///
/// Treated as unreliable: every call may fail with a transport, service or
/// malformed-payload error.
#[async_trait]
pub trait PhotoServicePort: Send + Sync {
    /// Recent photos when `request.query` is empty, text search otherwise.
    async fn fetch_page(&self, request: &PageRequest) -> Result<PhotoPage, FeedError>;

    async fn fetch_detail(&self, id: &PhotoId) -> Result<PhotoDetail, FeedError>;
}
