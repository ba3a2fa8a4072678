//! Corpus file formats and discovery
//!
//! The corpus directory holds three kinds of UTF-8 JSON documents: one
//! authors collection, one or more poem shard files selected by filename
//! prefix/suffix, and one curated anthology file. Unknown fields in the
//! source records are ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tangshi_common::Result;

/// One record of the authors collection file.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
    pub desc: String,
}

/// One record of a poem shard file. Verse lines arrive as an ordered
/// `paragraphs` sequence; the author is referenced by name only.
#[derive(Debug, Clone, Deserialize)]
pub struct PoemRecord {
    pub title: String,
    pub author: String,
    pub paragraphs: Vec<String>,
}

/// One record of the curated anthology file.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthologyRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub paragraphs: Vec<String>,
    pub tags: Vec<String>,
}

/// Join verse lines into stored content: newline separators, no trailing
/// separator.
pub fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs.join("\n")
}

/// Join tags into flat text, preserving order.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Parse a JSON collection file into records.
pub fn load_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Discover poem shard files by filename prefix/suffix match.
///
/// Order among shards does not matter (no cross-shard dependency); the list
/// is sorted only so logs are deterministic.
pub fn discover_shards(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut shards = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(prefix) && name.ends_with(suffix) {
            shards.push(entry.path());
        }
    }

    shards.sort();
    Ok(shards)
}
