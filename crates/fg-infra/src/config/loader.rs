//! # Configuration Loader
//!
//! Reads an optional TOML file with `[api]`, `[feed]` and `[storage]` tables
//! and overlays it on [`AppConfig::with_data_dir`] defaults. A key absent from
//! the file keeps its default; a missing file means all defaults.
//!
//! Environment overrides are applied separately by [`apply_env_overrides`].
//! Validation (e.g. a non-empty API key) belongs to the caller.

use std::path::{Path, PathBuf};

use anyhow::Context;
use fg_core::config::AppConfig;
use serde::Deserialize;

pub const API_KEY_ENV: &str = "FLICKR_API_KEY";
pub const API_BASE_URL_ENV: &str = "FLICKR_API_BASE_URL";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiSection,
    feed: FeedSection,
    storage: StorageSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiSection {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeedSection {
    page_size: Option<u32>,
    debounce_ms: Option<u64>,
    cache_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StorageSection {
    cache_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

impl ConfigFile {
    fn apply(self, config: &mut AppConfig) {
        let ConfigFile { api, feed, storage } = self;

        if let Some(v) = api.base_url {
            config.api.base_url = v;
        }
        if let Some(v) = api.api_key {
            config.api.api_key = v;
        }
        if let Some(v) = api.timeout_secs {
            config.api.timeout_secs = v;
        }

        if let Some(v) = feed.page_size {
            config.feed.page_size = v;
        }
        if let Some(v) = feed.debounce_ms {
            config.feed.debounce_ms = v;
        }
        if let Some(v) = feed.cache_key {
            config.feed.cache_key = v;
        }

        if let Some(v) = storage.cache_dir {
            config.storage.cache_dir = v;
        }
        if let Some(v) = storage.log_dir {
            config.storage.log_dir = v;
        }
    }
}

/// Loads configuration from `config_path` over defaults rooted at `data_dir`.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read, or is not valid TOML
/// for the expected tables.
pub fn load_config(config_path: Option<&Path>, data_dir: PathBuf) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::with_data_dir(data_dir);

    let Some(path) = config_path else {
        return Ok(config);
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(config);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    file.apply(&mut config);
    Ok(config)
}

/// Applies `FLICKR_API_KEY` / `FLICKR_API_BASE_URL` from `lookup`.
///
/// Blank values are ignored.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_blank(API_KEY_ENV) {
        config.api.api_key = key.trim().to_string();
    }
    if let Some(url) = non_blank(API_BASE_URL_ENV) {
        config.api.base_url = url.trim().to_string();
    }
    config
}
