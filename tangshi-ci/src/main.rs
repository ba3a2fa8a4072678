//! Corpus Import (tangshi-ci) - Main entry point
//!
//! Loads the JSON poetry corpus into the shared SQLite store: authors first,
//! then poem shards linked by a post-commit name->id snapshot, then the
//! curated anthology.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tangshi_ci::import::{run_import, CorpusLayout};
use tangshi_common::config;
use tangshi_common::db::init_database;

/// Command-line arguments for tangshi-ci
#[derive(Parser, Debug)]
#[command(name = "tangshi-ci")]
#[command(about = "Corpus import service for the tangshi store")]
#[command(version)]
struct Args {
    /// Directory containing the corpus JSON files
    corpus_dir: PathBuf,

    /// Root folder holding the database (overrides env/config resolution)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// File name of the authors collection inside the corpus directory
    #[arg(long, default_value = "authors.tang.json")]
    authors_file: String,

    /// File name of the curated anthology inside the corpus directory
    #[arg(long, default_value = "唐诗三百首.json")]
    curated_file: String,

    /// Filename prefix selecting poem shard files
    #[arg(long, default_value = "poet.tang.")]
    shard_prefix: String,

    /// Filename suffix selecting poem shard files
    #[arg(long, default_value = ".json")]
    shard_suffix: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tangshi_ci=info,tangshi_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting Tangshi Corpus Import (tangshi-ci) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let layout = CorpusLayout {
        dir: args.corpus_dir,
        authors_file: args.authors_file,
        curated_file: args.curated_file,
        shard_prefix: args.shard_prefix,
        shard_suffix: args.shard_suffix,
    };

    let stats = run_import(&pool, &layout)
        .await
        .context("Corpus import failed")?;

    info!(
        "Import finished: {} authors inserted ({} ignored), {} poems from {} shards ({} dropped), {} anthology rows",
        stats.authors_inserted,
        stats.authors_ignored,
        stats.poems_inserted,
        stats.shards_read,
        stats.poems_dropped,
        stats.anthology_inserted
    );

    pool.close().await;
    println!("Corpus import complete.");

    Ok(())
}
