//! Feed domain: queries, pages, state and failure classification.

pub mod error;
pub mod query;
pub mod snapshot;
pub mod state;

pub use error::{FeedError, FeedErrorKind};
pub use query::{LoadMode, PageRequest, PhotoPage, SearchQuery};
pub use snapshot::{CacheSnapshot, SNAPSHOT_SCHEMA_VERSION};
pub use state::{FeedState, FeedStatus};
