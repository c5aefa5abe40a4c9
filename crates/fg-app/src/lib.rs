//! Flickr gallery application orchestration layer
//!
//! This crate contains the feed controller and the photo detail use case.

pub mod deps;
pub mod usecases;

pub use deps::FeedDeps;
pub use usecases::feed::{FeedController, LoadOutcome, LoadRequest, RejectReason};
pub use usecases::get_photo_detail::GetPhotoDetail;
