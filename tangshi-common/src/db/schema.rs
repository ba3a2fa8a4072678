//! Schema maintenance helpers
//!
//! Column introspection via `PRAGMA table_info` plus idempotent column
//! addition via `ALTER TABLE`. This covers the one schema change the system
//! performs after initial creation (`authors.image_url`); anything beyond an
//! additive nullable column requires a manual migration and is out of scope.

use crate::Result;
use sqlx::{Row, SqlitePool};
use tracing::info;

/// Read the column names of a table using PRAGMA table_info.
pub async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    let query = format!("PRAGMA table_info({})", table);
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    Ok(rows.iter().map(|row| row.get::<String, _>("name")).collect())
}

/// Check if a table exists in the store's catalog.
pub async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name = ?
        )
        "#,
    )
    .bind(table)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Add a nullable column to a table if it is not already present.
///
/// SQLite's ALTER TABLE ADD COLUMN commits immediately. A duplicate-column
/// error from a concurrent initialization is tolerated.
pub async fn ensure_column(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    sql_type: &str,
) -> Result<()> {
    let columns = table_columns(pool, table).await?;
    if columns.iter().any(|c| c == column) {
        return Ok(());
    }

    let sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, sql_type);

    match sqlx::query(&sql).execute(pool).await {
        Ok(_) => {
            info!("Added column {}.{} ({})", table, column, sql_type);
            Ok(())
        }
        Err(sqlx::Error::Database(db_err)) if db_err.message().contains("duplicate column") => {
            info!("Column {}.{} already added elsewhere", table, column);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
