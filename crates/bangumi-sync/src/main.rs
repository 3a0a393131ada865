//! Bangumi sync CLI application.

use anyhow::{Context, Result};
use bangumi_sync::{check_local_data, local, BangumiClient, BangumiSync};
use clap::{Parser, Subcommand};
use shared::{Config, DataPaths};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sync a Bangumi collection into the site's data files", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Fetch collections and rewrite the generated JSON files (default)
    Sync,
    /// Validate the hand-authored fallback data
    CheckLocal,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    shared::logging::init(shared::LogConfig::from_settings(
        "bangumi-sync",
        &config.logging,
        args.verbose,
    ))?;

    info!(config_file = %args.config.display(), "Loaded configuration");
    if config.has_placeholder_user_id() {
        warn!(
            user_id = config.user_id(),
            "bangumi.user_id appears to be a template default"
        );
    }

    match args.command.unwrap_or(Command::Sync) {
        Command::Sync => run_sync(config).await,
        Command::CheckLocal => {
            let paths = DataPaths::new(config.output_dir(), config.local_dir());
            let report = check_local_data(&paths);
            local::ensure_valid(&report)
        }
    }
}

async fn run_sync(config: Config) -> Result<()> {
    info!(user_id = config.user_id(), "Read user id");

    let client = BangumiClient::new(&config.api).context("Failed to create Bangumi client")?;
    let sync = BangumiSync::new(client, config);

    let stats = sync.run().await.context("Sync failed")?;

    info!("=== Sync Complete ===");
    info!("Categories written: {}", stats.categories_written);
    info!("Categories skipped: {}", stats.categories_skipped);
    info!("Entries written: {}", stats.entries_written);
    info!("Pages fetched: {}", stats.pages_fetched);
    info!("Page failures: {}", stats.page_failures);
    info!("Entries without detail: {}", stats.detail_misses);
    if let Some(duration) = stats.duration() {
        info!("Duration: {}s", duration.num_seconds());
    }

    Ok(())
}
