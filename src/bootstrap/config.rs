//! Configuration resolution for the CLI.
//!
//! Order: defaults, then the TOML file, then the environment (including a
//! `.env` file in the working directory).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use fg_core::AppConfig;
use fg_infra::config::{apply_env_overrides, load_config, API_KEY_ENV};
use fg_infra::fs::{app_data_dir, default_config_path};

/// Resolves the effective configuration and checks it is usable.
pub fn resolve_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err).context("Failed to read .env file");
        }
    }

    let data_dir = app_data_dir()?;
    let path: Option<PathBuf> = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().ok(),
    };

    let config = load_config(path.as_deref(), data_dir)?;
    let config = apply_env_overrides(config, |name| std::env::var(name).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Startup checks the loader deliberately leaves out.
pub fn validate_config(config: &AppConfig) -> anyhow::Result<()> {
    if config.api.api_key.trim().is_empty() {
        bail!("Flickr API key is missing: set {API_KEY_ENV} or [api].api_key in the config file");
    }
    if config.feed.page_size == 0 {
        bail!("[feed].page_size must be at least 1");
    }
    Ok(())
}
