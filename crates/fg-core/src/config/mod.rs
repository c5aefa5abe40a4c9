//! Configuration data structures.

pub mod app_config;

pub use app_config::{ApiConfig, AppConfig, FeedConfig, StorageConfig};
