use std::sync::Arc;

use fg_core::ports::{FeedErrorReporterPort, PhotoServicePort};
use fg_core::{FeedError, PhotoDetail, PhotoId};
use tracing::debug;

/// Fetch the extended record for one photo.
///
/// Details are fetched on demand and never written to the snapshot cache.
pub struct GetPhotoDetail {
    service: Arc<dyn PhotoServicePort>,
    reporter: Arc<dyn FeedErrorReporterPort>,
}

impl GetPhotoDetail {
    pub fn new(
        service: Arc<dyn PhotoServicePort>,
        reporter: Arc<dyn FeedErrorReporterPort>,
    ) -> Self {
        Self { service, reporter }
    }

    pub async fn execute(&self, photo_id: &str) -> Result<PhotoDetail, FeedError> {
        let Some(id) = PhotoId::parse(photo_id) else {
            let err = FeedError::InvalidRequest("photo id is required".to_string());
            self.reporter.report("photo.detail", &err);
            return Err(err);
        };

        debug!(photo_id = %id, "fetching photo detail");
        self.service.fetch_detail(&id).await.map_err(|err| {
            self.reporter.report("photo.detail", &err);
            err
        })
    }
}
