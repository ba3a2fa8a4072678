//! Curated anthology (tang300) database operations

use crate::db::models::AnthologyPoem;
use crate::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};

fn anthology_from_row(row: &SqliteRow) -> AnthologyPoem {
    AnthologyPoem {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get("author"),
        content: row.get("content"),
        tags: row.get("tags"),
    }
}

/// Insert one anthology entry. The id is externally supplied; author stays
/// denormalized text with no lookup.
pub async fn insert_anthology_poem<'e, E>(executor: E, poem: &AnthologyPoem) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO tang300 (id, title, author, content, tags) VALUES (?, ?, ?, ?, ?)")
        .bind(&poem.id)
        .bind(&poem.title)
        .bind(&poem.author)
        .bind(&poem.content)
        .bind(&poem.tags)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn count_anthology(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tang300")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn get_anthology_poem(pool: &SqlitePool, id: &str) -> Result<Option<AnthologyPoem>> {
    let row = sqlx::query("SELECT id, title, author, content, tags FROM tang300 WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(anthology_from_row))
}
