//! Tests for database initialization and re-run behavior

use std::path::PathBuf;
use tangshi_common::db::init::{connect_readonly, init_database};
use tangshi_common::db::schema::{ensure_column, table_columns, table_exists};
use tempfile::TempDir;

fn scratch_db(dir: &TempDir) -> PathBuf {
    dir.path().join("tangshi.db")
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = scratch_db(&dir);

    let pool = init_database(&db_path).await.expect("init should succeed");

    assert!(db_path.exists(), "Database file was not created");

    for table in ["authors", "poems", "tang300"] {
        assert!(
            table_exists(&pool, table).await.unwrap(),
            "missing table {}",
            table
        );
    }
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = scratch_db(&dir);

    let pool1 = init_database(&db_path).await.unwrap();
    pool1.close().await;

    // Second init must not disturb the existing schema
    let pool2 = init_database(&db_path).await.expect("reopen should succeed");
    assert!(table_exists(&pool2, "authors").await.unwrap());
}

#[tokio::test]
async fn test_initial_authors_schema_has_no_image_url() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&scratch_db(&dir)).await.unwrap();

    // The portrait column belongs to the enrichment pass, not initial load
    let columns = table_columns(&pool, "authors").await.unwrap();
    assert_eq!(columns, vec!["author_id", "name", "description"]);
}

#[tokio::test]
async fn test_image_url_column_survives_reinit() {
    let dir = TempDir::new().unwrap();
    let db_path = scratch_db(&dir);

    let pool = init_database(&db_path).await.unwrap();
    ensure_column(&pool, "authors", "image_url", "TEXT").await.unwrap();
    pool.close().await;

    let pool = init_database(&db_path).await.unwrap();
    let columns = table_columns(&pool, "authors").await.unwrap();
    assert!(columns.iter().any(|c| c == "image_url"));
}

#[tokio::test]
async fn test_readonly_refuses_missing_database() {
    let dir = TempDir::new().unwrap();
    let result = connect_readonly(&dir.path().join("absent.db")).await;
    assert!(result.is_err(), "connecting to a missing store should fail");
}

#[tokio::test]
async fn test_readonly_rejects_writes() {
    let dir = TempDir::new().unwrap();
    let db_path = scratch_db(&dir);

    let pool = init_database(&db_path).await.unwrap();
    pool.close().await;

    let ro = connect_readonly(&db_path).await.unwrap();
    let result = sqlx::query("INSERT INTO authors (name, description) VALUES ('x', 'y')")
        .execute(&ro)
        .await;
    assert!(result.is_err(), "write should fail on a read-only connection");
}
