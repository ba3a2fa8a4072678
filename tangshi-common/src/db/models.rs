//! Database models

use serde::{Deserialize, Serialize};

/// A poet. `name` is the natural key used for de-duplication at import time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub author_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Portrait URL scraped by the enrichment service; null until enriched.
    pub image_url: Option<String>,
}

/// A titled work attributed to one author via foreign key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poem {
    pub poem_id: i64,
    pub title: Option<String>,
    pub author_id: i64,
    pub content: Option<String>,
}

/// One entry of the curated "Three Hundred Tang Poems" anthology.
///
/// Independently keyed; `author` is denormalized text and `tags` a
/// comma-joined flat list, both by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthologyPoem {
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
}

/// Corpus-wide totals served by the data view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CorpusStats {
    pub poets: i64,
    pub poems: i64,
    pub words: i64,
}

/// Per-author poem and word counts, for the data view's tables and charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorStats {
    pub author_id: i64,
    pub author_name: String,
    pub poem_count: i64,
    pub word_count: i64,
}
