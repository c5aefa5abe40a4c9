//! Use cases
//!
//! Presentation intents (search text, refresh, scroll-to-end, retry, open
//! detail) map onto these entry points:
//!
//! FeedController::search_debounced / load_more / refresh / retry_last
//!         ↓
//! PhotoServicePort ── PhotoCachePort
//!         ↓
//! FeedState (watch channel) → presentation re-renders
//!
//! GetPhotoDetail → PhotoServicePort (never cached)

pub mod feed;
pub mod get_photo_detail;
