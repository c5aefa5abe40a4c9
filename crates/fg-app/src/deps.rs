//! # Feed Dependencies
//!
//! Dependency grouping for controller construction. Not a builder: no build
//! steps, no defaults, just parameter grouping.

use std::sync::Arc;

use fg_core::ports::{FeedErrorReporterPort, PhotoCachePort, PhotoServicePort};

/// All dependencies are required.
#[derive(Clone)]
pub struct FeedDeps {
    pub service: Arc<dyn PhotoServicePort>,
    pub cache: Arc<dyn PhotoCachePort>,
    pub reporter: Arc<dyn FeedErrorReporterPort>,
}
