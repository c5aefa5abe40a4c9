//! # fg-core
//!
//! Core domain models and feed rules for the Flickr gallery client.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod feed;
pub mod ids;
pub mod photo;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::{AppConfig, FeedConfig};
pub use feed::{
    FeedError, FeedErrorKind, FeedState, FeedStatus, LoadMode, PageRequest, PhotoPage,
    SearchQuery,
};
pub use ids::PhotoId;
pub use photo::{Photo, PhotoDetail, PhotoUrls, SizeVariants};
