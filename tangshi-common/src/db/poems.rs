//! Poem database operations

use crate::db::models::{AuthorStats, CorpusStats, Poem};
use crate::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};

fn poem_from_row(row: &SqliteRow) -> Poem {
    Poem {
        poem_id: row.get("poem_id"),
        title: row.get("title"),
        author_id: row.get("author_id"),
        content: row.get("content"),
    }
}

pub async fn insert_poem<'e, E>(executor: E, title: &str, author_id: i64, content: &str) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO poems (title, author_id, content) VALUES (?, ?, ?)")
        .bind(title)
        .bind(author_id)
        .bind(content)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn count_poems(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM poems")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn list_poems(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Poem>> {
    let rows = sqlx::query(
        "SELECT poem_id, title, author_id, content FROM poems ORDER BY poem_id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(poem_from_row).collect())
}

pub async fn get_poem(pool: &SqlitePool, poem_id: i64) -> Result<Option<Poem>> {
    let row = sqlx::query("SELECT poem_id, title, author_id, content FROM poems WHERE poem_id = ?")
        .bind(poem_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(poem_from_row))
}

pub async fn count_poems_by_author(pool: &SqlitePool, author_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM poems WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn poems_by_author(
    pool: &SqlitePool,
    author_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<Poem>> {
    let rows = sqlx::query(
        r#"
        SELECT poem_id, title, author_id, content FROM poems
        WHERE author_id = ?
        ORDER BY poem_id LIMIT ? OFFSET ?
        "#,
    )
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(poem_from_row).collect())
}

pub async fn count_poems_by_text(pool: &SqlitePool, text: &str) -> Result<i64> {
    let pattern = format!("%{}%", text);
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM poems WHERE title LIKE ? OR content LIKE ?")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Fuzzy-match poems by title or content, paged.
pub async fn search_poems(
    pool: &SqlitePool,
    text: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Poem>> {
    let pattern = format!("%{}%", text);
    let rows = sqlx::query(
        r#"
        SELECT poem_id, title, author_id, content FROM poems
        WHERE title LIKE ? OR content LIKE ?
        ORDER BY poem_id LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(poem_from_row).collect())
}

/// Corpus-wide totals: distinct poets, poem count, and total content length.
pub async fn corpus_stats(pool: &SqlitePool) -> Result<CorpusStats> {
    let (poets, poems, words) = sqlx::query_as::<_, (i64, i64, i64)>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM authors),
            (SELECT COUNT(*) FROM poems),
            (SELECT COALESCE(SUM(LENGTH(content)), 0) FROM poems)
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(CorpusStats { poets, poems, words })
}

/// Per-author poem and word counts, descending by poem count.
///
/// Authors without poems are omitted, matching the inner-join shape of the
/// original reporting views.
pub async fn author_stats(pool: &SqlitePool) -> Result<Vec<AuthorStats>> {
    let rows = sqlx::query_as::<_, (i64, String, i64, i64)>(
        r#"
        SELECT a.author_id, a.name,
               COUNT(p.poem_id) AS poem_count,
               COALESCE(SUM(LENGTH(p.content)), 0) AS word_count
        FROM authors a
        JOIN poems p ON p.author_id = a.author_id
        GROUP BY a.author_id, a.name
        ORDER BY poem_count DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(author_id, author_name, poem_count, word_count)| AuthorStats {
            author_id,
            author_name,
            poem_count,
            word_count,
        })
        .collect())
}
