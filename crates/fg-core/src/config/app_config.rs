//! Application configuration domain model

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api.flickr.com/services/rest/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_CACHE_KEY: &str = "cached_photos_v1";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote photo service settings
    pub api: ApiConfig,

    /// Feed controller tuning
    pub feed: FeedConfig,

    /// On-disk locations
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,

    /// May be empty here; startup refuses to run without one.
    pub api_key: String,

    pub timeout_secs: u64,
}

/// Feed controller constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Photos requested per page
    pub page_size: u32,

    /// Quiescence window for debounced search
    pub debounce_ms: u64,

    /// Key the cached snapshot is stored under
    pub cache_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub cache_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl FeedConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Lays out cache and log directories under `data_dir`.
    pub fn under(data_dir: PathBuf) -> Self {
        Self {
            cache_dir: data_dir.join("cache"),
            log_dir: data_dir.join("logs"),
        }
    }
}

impl AppConfig {
    /// Defaults with all paths rooted at `data_dir`.
    ///
    /// The base directory is computed by the caller (e.g. with `dirs`).
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            api: ApiConfig::default(),
            feed: FeedConfig::default(),
            storage: StorageConfig::under(data_dir),
        }
    }
}
