//! Portrait Enrichment (tangshi-pe) - Main entry point
//!
//! Walks every author in an already-populated store and attaches a scraped
//! portrait URL, one sequential request at a time.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tangshi_common::config;
use tangshi_common::db::init::connect_existing;
use tangshi_pe::bing::{PortraitSearchClient, DEFAULT_ENDPOINT, MARKER_CLASS};
use tangshi_pe::enrich::{run_enrich, EnrichOptions};

/// Command-line arguments for tangshi-pe
#[derive(Parser, Debug)]
#[command(name = "tangshi-pe")]
#[command(about = "Portrait enrichment service for the tangshi store")]
#[command(version)]
struct Args {
    /// Root folder holding the database (overrides env/config resolution)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Image search endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    /// Fixed delay between requests in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,

    /// Class token identifying result thumbnails in the markup
    #[arg(long, default_value = MARKER_CLASS)]
    marker_class: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tangshi_pe=info,tangshi_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting Tangshi Portrait Enrichment (tangshi-pe) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = connect_existing(&db_path)
        .await
        .context("Failed to open database")?;

    let client = PortraitSearchClient::new(
        args.endpoint,
        Duration::from_secs(args.timeout_secs),
    );
    let options = EnrichOptions {
        delay: Duration::from_millis(args.delay_ms),
        marker_class: args.marker_class,
    };

    let stats = run_enrich(&pool, &client, &options)
        .await
        .context("Portrait enrichment failed")?;

    info!(
        "Enrichment finished: {} authors, {} updated, {} without image, {} request failures",
        stats.authors_seen, stats.updated, stats.no_image, stats.request_failed
    );

    pool.close().await;
    println!("Portrait enrichment complete.");

    Ok(())
}
