pub mod cache;
pub mod config;
pub mod flickr;
pub mod fs;
pub mod reporting;

pub use cache::JsonFileSnapshotCache;
pub use flickr::FlickrPhotoService;
pub use reporting::TracingErrorReporter;
