//! Tracing configuration for the gallery CLI.
//!
//! - stdout layer, chrono timestamps
//! - optional non-blocking file layer under the configured log directory
//! - `RUST_LOG` overrides the default directives

use std::path::Path;
use std::sync::OnceLock;
use std::{fs, io};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

const LOG_FILE_NAME: &str = "flickr-gallery.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives.
///
/// Debug builds log the feed crates at `debug`; release builds at `info`.
/// HTTP internals stay at `warn` either way.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("fg_app={level}"),
        format!("fg_infra={level}"),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
        "rustls=warn".to_string(),
    ]
}

/// Installs the global subscriber. Call once, before any logging occurs.
///
/// File logging failures fall back to stdout only.
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(log_dir: &Path) -> anyhow::Result<()> {
    let directives = build_filter_directives(is_development());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives.join(",")));

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_target(true)
        .with_writer(BoxMakeWriter::new(io::stderr));

    let file_layer = match build_file_writer(log_dir) {
        Ok(writer) => Some(
            fmt::layer()
                .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        ),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
            None
        }
    };

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}

fn build_file_writer(log_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
