//! Database initialization
//!
//! Creates the database file on first run and ensures the three corpus
//! tables exist. Table creation is idempotent; an existing database with an
//! incompatible schema is left untouched.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use sqlite options to create database if it doesn't exist
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new().connect(&db_url).await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL keeps readers (the data view service) from blocking the writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Idempotent - safe to call multiple times
    create_authors_table(&pool).await?;
    create_poems_table(&pool).await?;
    create_tang300_table(&pool).await?;

    Ok(pool)
}

/// Connect to an existing database for writing, without creating one.
///
/// The enrichment service mutates a store the import already populated; a
/// missing file means the import never ran.
pub async fn connect_existing(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(crate::Error::NotFound(format!(
            "Database not found: {} (run tangshi-ci first to populate it)",
            db_path.display()
        )));
    }

    let db_url = format!("sqlite://{}", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    Ok(pool)
}

/// Connect to an existing database in read-only mode.
///
/// Refuses to connect when the database file does not exist, rather than
/// silently creating an empty store.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(crate::Error::NotFound(format!(
            "Database not found: {} (run tangshi-ci first to populate it)",
            db_path.display()
        )));
    }

    let db_url = format!("sqlite://{}?mode=ro", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    Ok(pool)
}

/// Create the authors table
///
/// `name` is the natural key: duplicate inserts are ignored, not errored.
/// The nullable `image_url` column is NOT part of initial creation; the
/// portrait enrichment service adds it later via `schema::ensure_column`.
pub async fn create_authors_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            author_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the poems table
///
/// Each poem links to its author by surrogate key, resolved from the
/// author's name at import time.
pub async fn create_poems_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS poems (
            poem_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            author_id INTEGER,
            content TEXT,
            FOREIGN KEY (author_id) REFERENCES authors (author_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the curated "Three Hundred Tang Poems" table
///
/// Keyed by the anthology's own id. `author` is denormalized text with no
/// foreign key; the table is fully independent of authors/poems.
pub async fn create_tang300_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tang300 (
            id TEXT PRIMARY KEY,
            title TEXT,
            author TEXT,
            content TEXT,
            tags TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
