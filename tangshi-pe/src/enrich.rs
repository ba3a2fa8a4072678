//! The per-author enrichment loop
//!
//! Reads a one-shot snapshot of `(author_id, name)` pairs, then walks it
//! sequentially: one search request, one extraction, one per-row commit,
//! one fixed sleep. Transport failures and missing images are logged and
//! skipped; an author's previous `image_url` is never overwritten on
//! failure. Only schema operations and write failures are fatal.

use crate::bing::PortraitSearchClient;
use crate::extract;
use sqlx::SqlitePool;
use std::time::Duration;
use tangshi_common::db::{authors, schema};
use tangshi_common::Result;
use tracing::{error, info, warn};

/// Knobs for one enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Fixed pause after every author, regardless of outcome.
    pub delay: Duration,
    /// Class token identifying result thumbnails in the markup.
    pub marker_class: String,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(1),
            marker_class: crate::bing::MARKER_CLASS.to_string(),
        }
    }
}

/// Counters from one enrichment run.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnrichStats {
    pub authors_seen: u64,
    pub updated: u64,
    pub no_image: u64,
    pub request_failed: u64,
}

/// Ensure the portrait column exists on the authors table.
///
/// Committed immediately; fatal on failure.
pub async fn ensure_image_column(pool: &SqlitePool) -> Result<()> {
    schema::ensure_column(pool, "authors", "image_url", "TEXT").await
}

/// Run the enrichment pass over every author currently in the store.
pub async fn run_enrich(
    pool: &SqlitePool,
    client: &PortraitSearchClient,
    options: &EnrichOptions,
) -> Result<EnrichStats> {
    ensure_image_column(pool).await?;

    // Finite, non-restartable snapshot: authors added after this read are
    // not processed.
    let snapshot = authors::author_names(pool).await?;
    info!("Enriching {} authors", snapshot.len());

    let mut stats = EnrichStats::default();

    for (author_id, name) in snapshot {
        stats.authors_seen += 1;

        match client.fetch(&name).await {
            Ok(body) => match extract::first_image_src(&body, &options.marker_class) {
                Some(image_url) => {
                    // Write failures are not recoverable mid-run
                    authors::update_image_url(pool, author_id, &image_url).await?;
                    info!("Updated {} with image: {}", name, image_url);
                    stats.updated += 1;
                }
                None => {
                    warn!("No image found for {}", name);
                    stats.no_image += 1;
                }
            },
            Err(e) => {
                error!("Request failed for {}: {}", name, e);
                stats.request_failed += 1;
            }
        }

        tokio::time::sleep(options.delay).await;
    }

    Ok(stats)
}
