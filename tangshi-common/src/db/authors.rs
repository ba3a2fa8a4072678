//! Author database operations

use crate::db::models::Author;
use crate::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use std::collections::HashMap;

/// Map an author row.
///
/// Uses SELECT * plus a tolerant `image_url` read so the same mapping works
/// before and after the enrichment service has added the column.
fn author_from_row(row: &SqliteRow) -> Author {
    Author {
        author_id: row.get("author_id"),
        name: row.get("name"),
        description: row.get("description"),
        image_url: row.try_get("image_url").unwrap_or(None),
    }
}

/// Insert an author, ignoring (not erroring) on name collision.
///
/// Returns true when a row was actually inserted.
pub async fn insert_author_ignore<'e, E>(executor: E, name: &str, description: &str) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT OR IGNORE INTO authors (name, description) VALUES (?, ?)")
        .bind(name)
        .bind(description)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Read the full name -> author_id mapping into memory.
///
/// Built once after the author batch commits; the import treats it as a
/// read-only snapshot for the rest of the run.
pub async fn author_id_map(pool: &SqlitePool) -> Result<HashMap<String, i64>> {
    let rows = sqlx::query_as::<_, (String, i64)>("SELECT name, author_id FROM authors")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().collect())
}

/// Read all `(author_id, name)` pairs.
///
/// The enrichment loop iterates this finite snapshot; authors added after
/// the read are not processed.
pub async fn author_names(pool: &SqlitePool) -> Result<Vec<(i64, String)>> {
    let rows = sqlx::query_as::<_, (i64, String)>("SELECT author_id, name FROM authors")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn count_authors(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// List authors in id order, one page at a time.
pub async fn list_authors(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Author>> {
    let rows = sqlx::query("SELECT * FROM authors ORDER BY author_id LIMIT ? OFFSET ?")
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(author_from_row).collect())
}

pub async fn get_author(pool: &SqlitePool, author_id: i64) -> Result<Option<Author>> {
    let row = sqlx::query("SELECT * FROM authors WHERE author_id = ?")
        .bind(author_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(author_from_row))
}

pub async fn count_authors_by_name(pool: &SqlitePool, name: &str) -> Result<i64> {
    let pattern = format!("%{}%", name);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors WHERE name LIKE ?")
        .bind(pattern)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Fuzzy-match authors by name, paged.
pub async fn search_authors(
    pool: &SqlitePool,
    name: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Author>> {
    let pattern = format!("%{}%", name);
    let rows =
        sqlx::query("SELECT * FROM authors WHERE name LIKE ? ORDER BY author_id LIMIT ? OFFSET ?")
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

    Ok(rows.iter().map(author_from_row).collect())
}

/// Write back a scraped portrait URL. Committed per row by the enricher.
pub async fn update_image_url(pool: &SqlitePool, author_id: i64, image_url: &str) -> Result<()> {
    sqlx::query("UPDATE authors SET image_url = ? WHERE author_id = ?")
        .bind(image_url)
        .bind(author_id)
        .execute(pool)
        .await?;

    Ok(())
}
