//! The three-batch import pipeline
//!
//! Strictly sequential: author batch, name->id resolution, poem shards,
//! curated anthology. One transaction commit per batch. Any file or store
//! error aborts the run; the only per-record recovery is the silent drop of
//! poems whose author is not in the store, surfaced as a count.

use crate::corpus::{
    self, AnthologyRecord, AuthorRecord, PoemRecord,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tangshi_common::db::models::AnthologyPoem;
use tangshi_common::db::{anthology, authors, poems};
use tangshi_common::Result;
use tracing::info;

/// Where the corpus files live and what they are called.
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    pub dir: PathBuf,
    pub authors_file: String,
    pub curated_file: String,
    pub shard_prefix: String,
    pub shard_suffix: String,
}

/// Counters from one import run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportStats {
    pub authors_inserted: u64,
    pub authors_ignored: u64,
    pub shards_read: u64,
    pub poems_inserted: u64,
    /// Poems skipped because their author is not in the store. The drop is
    /// deliberate; the count makes it visible.
    pub poems_dropped: u64,
    pub anthology_inserted: u64,
}

/// Run the full import against an initialized store.
pub async fn run_import(pool: &SqlitePool, layout: &CorpusLayout) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    ingest_authors(pool, layout, &mut stats).await?;

    // The surrogate keys exist only after the author batch commits, so the
    // join key for poems is resolved in a second pass.
    let author_ids = authors::author_id_map(pool).await?;
    info!("Resolved {} author ids", author_ids.len());

    ingest_poems(pool, layout, &author_ids, &mut stats).await?;
    ingest_anthology(pool, layout, &mut stats).await?;

    Ok(stats)
}

async fn ingest_authors(
    pool: &SqlitePool,
    layout: &CorpusLayout,
    stats: &mut ImportStats,
) -> Result<()> {
    let path = layout.dir.join(&layout.authors_file);
    let records: Vec<AuthorRecord> = corpus::load_records(&path)?;

    let mut tx = pool.begin().await?;
    for record in &records {
        if authors::insert_author_ignore(&mut *tx, &record.name, &record.desc).await? {
            stats.authors_inserted += 1;
        } else {
            stats.authors_ignored += 1;
        }
    }
    tx.commit().await?;

    info!(
        "Author batch committed: {} inserted, {} ignored",
        stats.authors_inserted, stats.authors_ignored
    );
    Ok(())
}

async fn ingest_poems(
    pool: &SqlitePool,
    layout: &CorpusLayout,
    author_ids: &std::collections::HashMap<String, i64>,
    stats: &mut ImportStats,
) -> Result<()> {
    let shards = corpus::discover_shards(&layout.dir, &layout.shard_prefix, &layout.shard_suffix)?;

    let mut tx = pool.begin().await?;
    for shard in &shards {
        let records: Vec<PoemRecord> = corpus::load_records(shard)?;
        stats.shards_read += 1;

        for record in &records {
            match author_ids.get(&record.author) {
                Some(&author_id) => {
                    let content = corpus::join_paragraphs(&record.paragraphs);
                    poems::insert_poem(&mut *tx, &record.title, author_id, &content).await?;
                    stats.poems_inserted += 1;
                }
                None => stats.poems_dropped += 1,
            }
        }
    }
    tx.commit().await?;

    info!(
        "Poem batch committed: {} shards, {} poems inserted, {} dropped (author not found)",
        stats.shards_read, stats.poems_inserted, stats.poems_dropped
    );
    Ok(())
}

async fn ingest_anthology(
    pool: &SqlitePool,
    layout: &CorpusLayout,
    stats: &mut ImportStats,
) -> Result<()> {
    let path = layout.dir.join(&layout.curated_file);
    let records: Vec<AnthologyRecord> = corpus::load_records(&path)?;

    let mut tx = pool.begin().await?;
    for record in &records {
        let entry = AnthologyPoem {
            id: record.id.clone(),
            title: Some(record.title.clone()),
            author: Some(record.author.clone()),
            content: Some(corpus::join_paragraphs(&record.paragraphs)),
            tags: Some(corpus::join_tags(&record.tags)),
        };
        anthology::insert_anthology_poem(&mut *tx, &entry).await?;
        stats.anthology_inserted += 1;
    }
    tx.commit().await?;

    info!("Anthology batch committed: {} rows", stats.anthology_inserted);
    Ok(())
}
