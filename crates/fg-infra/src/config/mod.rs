//! TOML configuration loading.

mod loader;

pub use loader::{apply_env_overrides, load_config, API_BASE_URL_ENV, API_KEY_ENV};
