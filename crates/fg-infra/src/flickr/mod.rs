//! Flickr REST adapter for [`fg_core::ports::PhotoServicePort`].

mod client;
pub mod dto;
pub mod params;

pub use client::FlickrPhotoService;
