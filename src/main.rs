mod bootstrap;
mod render;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use fg_app::{FeedController, LoadOutcome};
use fg_core::LoadMode;
use tracing::info;

use bootstrap::wiring::AppServices;

#[derive(Parser)]
#[command(name = "flickr-gallery")]
#[command(version)]
#[command(about = "Browse recent and searched Flickr photos from the terminal")]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Path to a TOML config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the most recent public photos
    Recent {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Search photos by text
    Search {
        query: String,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show the extended record of one photo
    Detail { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::config::resolve_config(cli.config.as_deref())?;
    bootstrap::tracing::init_tracing_subscriber(&config.storage.log_dir)?;
    let services = bootstrap::wiring::wire(&config)?;

    let result = run(&services, cli.command).await;
    services.feed.shutdown();
    result
}

async fn run(services: &AppServices, command: Commands) -> Result<()> {
    match command {
        Commands::Recent { pages } => {
            let first = services.feed.start().await;
            page_forward(&services.feed, first, pages).await
        }
        Commands::Search { query, pages } => {
            let first = services.feed.load(&query, 1, LoadMode::Initial).await;
            page_forward(&services.feed, first, pages).await
        }
        Commands::Detail { id } => match services.detail.execute(&id).await {
            Ok(detail) => {
                render::print_detail(&detail);
                Ok(())
            }
            Err(err) => bail!(err.user_message()),
        },
    }
}

/// Loads up to `pages - 1` more pages after `first`, then prints the feed.
async fn page_forward(feed: &FeedController, first: LoadOutcome, pages: u32) -> Result<()> {
    let mut outcome = first;
    let mut loaded = 1;
    while outcome.is_applied() && loaded < pages && feed.has_more() {
        outcome = feed.load_more().await;
        loaded += 1;
    }

    let state = feed.state();
    render::print_feed(&state);
    info!(items = state.items().len(), pages = state.current_page(), "feed printed");

    match state.last_error() {
        Some(err) => bail!(err.user_message()),
        None => Ok(()),
    }
}
