//! Builds adapters and use cases from a resolved [`AppConfig`].

use std::sync::Arc;

use fg_app::{FeedController, FeedDeps, GetPhotoDetail};
use fg_core::AppConfig;
use fg_infra::{FlickrPhotoService, JsonFileSnapshotCache, TracingErrorReporter};

pub struct AppServices {
    pub feed: FeedController,
    pub detail: GetPhotoDetail,
}

pub fn wire(config: &AppConfig) -> anyhow::Result<AppServices> {
    let service = Arc::new(FlickrPhotoService::new(&config.api)?);
    let cache = Arc::new(JsonFileSnapshotCache::new(
        &config.storage.cache_dir,
        &config.feed.cache_key,
    ));
    let reporter = Arc::new(TracingErrorReporter::new());

    tracing::debug!(
        base_url = %config.api.base_url,
        cache = %cache.path().display(),
        page_size = config.feed.page_size,
        "wired feed services"
    );

    let feed = FeedController::new(
        FeedDeps {
            service: service.clone(),
            cache,
            reporter: reporter.clone(),
        },
        config.feed.clone(),
    );
    let detail = GetPhotoDetail::new(service, reporter);

    Ok(AppServices { feed, detail })
}
