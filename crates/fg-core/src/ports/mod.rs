//! Port interfaces for the application layer
//!
//! Ports define the contract between the feed use cases and infrastructure
//! implementations. The remote photo service, the snapshot cache and the
//! error sink are all external collaborators reached only through these
//! traits.

mod error_reporter;
pub mod errors;
mod photo_cache;
mod photo_service;

pub use error_reporter::FeedErrorReporterPort;
pub use errors::CacheError;
pub use photo_cache::PhotoCachePort;
pub use photo_service::PhotoServicePort;
