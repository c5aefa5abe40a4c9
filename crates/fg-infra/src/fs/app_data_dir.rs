use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "flickr-gallery";

/// Get the application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/flickr-gallery
/// - Windows: %APPDATA%\flickr-gallery
/// - Linux: $XDG_DATA_HOME/flickr-gallery or ~/.local/share/flickr-gallery
///
/// This function does not create the directory; the caller decides when.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

/// `config.toml` under the platform config directory.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(base.join(APP_DIR_NAME).join("config.toml"))
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}
