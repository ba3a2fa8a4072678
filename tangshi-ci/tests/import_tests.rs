//! End-to-end tests for the corpus import pipeline
//!
//! Each test builds a small corpus directory and a scratch database under a
//! temp dir, runs the full import, and inspects the store.

use sqlx::SqlitePool;
use std::path::Path;
use tangshi_ci::import::{run_import, CorpusLayout};
use tangshi_common::db::init_database;
use tangshi_common::db::{anthology, authors, poems};
use tempfile::TempDir;

const AUTHORS_JSON: &str = r#"[
    {"name": "李白", "desc": "字太白，号青莲居士"},
    {"name": "杜甫", "desc": "字子美"}
]"#;

const SHARD_0_JSON: &str = r#"[
    {"title": "静夜思", "author": "李白", "paragraphs": ["床前明月光，", "疑是地上霜。"]},
    {"title": "春江花月夜", "author": "张若虚", "paragraphs": ["春江潮水连海平"]}
]"#;

const SHARD_1000_JSON: &str = r#"[
    {"title": "春望", "author": "杜甫", "paragraphs": ["国破山河在，", "城春草木深。"]}
]"#;

const ANTHOLOGY_JSON: &str = r#"[
    {
        "id": "q-0001",
        "title": "静夜思",
        "author": "李白",
        "paragraphs": ["床前明月光，", "疑是地上霜。"],
        "tags": ["五言绝句", "唐诗三百首"]
    }
]"#;

fn write_corpus(dir: &Path) {
    std::fs::write(dir.join("authors.tang.json"), AUTHORS_JSON).unwrap();
    std::fs::write(dir.join("poet.tang.0.json"), SHARD_0_JSON).unwrap();
    std::fs::write(dir.join("poet.tang.1000.json"), SHARD_1000_JSON).unwrap();
    std::fs::write(dir.join("唐诗三百首.json"), ANTHOLOGY_JSON).unwrap();
}

fn layout(dir: &Path) -> CorpusLayout {
    CorpusLayout {
        dir: dir.to_path_buf(),
        authors_file: "authors.tang.json".to_string(),
        curated_file: "唐诗三百首.json".to_string(),
        shard_prefix: "poet.tang.".to_string(),
        shard_suffix: ".json".to_string(),
    }
}

async fn setup(dir: &TempDir) -> SqlitePool {
    let corpus = dir.path().join("corpus");
    std::fs::create_dir_all(&corpus).unwrap();
    write_corpus(&corpus);
    init_database(&dir.path().join("tangshi.db")).await.unwrap()
}

#[tokio::test]
async fn test_full_import_counts() {
    let dir = TempDir::new().unwrap();
    let pool = setup(&dir).await;

    let stats = run_import(&pool, &layout(&dir.path().join("corpus")))
        .await
        .unwrap();

    assert_eq!(stats.authors_inserted, 2);
    assert_eq!(stats.authors_ignored, 0);
    assert_eq!(stats.shards_read, 2);
    assert_eq!(stats.poems_inserted, 2);
    assert_eq!(stats.poems_dropped, 1);
    assert_eq!(stats.anthology_inserted, 1);

    assert_eq!(authors::count_authors(&pool).await.unwrap(), 2);
    assert_eq!(poems::count_poems(&pool).await.unwrap(), 2);
    assert_eq!(anthology::count_anthology(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_poem_content_joined_with_newlines() {
    let dir = TempDir::new().unwrap();
    let pool = setup(&dir).await;
    run_import(&pool, &layout(&dir.path().join("corpus"))).await.unwrap();

    let ids = authors::author_id_map(&pool).await.unwrap();
    let li_bai_poems = poems::poems_by_author(&pool, ids["李白"], 10, 0).await.unwrap();

    assert_eq!(li_bai_poems.len(), 1);
    assert_eq!(li_bai_poems[0].title.as_deref(), Some("静夜思"));
    assert_eq!(
        li_bai_poems[0].content.as_deref(),
        Some("床前明月光，\n疑是地上霜。")
    );
}

#[tokio::test]
async fn test_poems_without_known_author_are_dropped() {
    let dir = TempDir::new().unwrap();
    let pool = setup(&dir).await;
    let stats = run_import(&pool, &layout(&dir.path().join("corpus"))).await.unwrap();

    // 张若虚 is not in the authors collection: no author row, no poem row
    assert_eq!(stats.poems_dropped, 1);
    let ids = authors::author_id_map(&pool).await.unwrap();
    assert!(!ids.contains_key("张若虚"));
    assert_eq!(poems::count_poems_by_text(&pool, "春江潮水").await.unwrap(), 0);
}

#[tokio::test]
async fn test_anthology_row_is_denormalized() {
    let dir = TempDir::new().unwrap();
    let pool = setup(&dir).await;
    run_import(&pool, &layout(&dir.path().join("corpus"))).await.unwrap();

    let entry = anthology::get_anthology_poem(&pool, "q-0001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.author.as_deref(), Some("李白"));
    assert_eq!(entry.content.as_deref(), Some("床前明月光，\n疑是地上霜。"));
    assert_eq!(entry.tags.as_deref(), Some("五言绝句, 唐诗三百首"));
}

#[tokio::test]
async fn test_rerun_does_not_duplicate_authors() {
    let dir = TempDir::new().unwrap();
    let pool = setup(&dir).await;
    let corpus = dir.path().join("corpus");

    run_import(&pool, &layout(&corpus)).await.unwrap();
    let second = run_import(&pool, &layout(&corpus)).await.unwrap();

    assert_eq!(second.authors_inserted, 0);
    assert_eq!(second.authors_ignored, 2);
    assert_eq!(authors::count_authors(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_authors_file_aborts() {
    let dir = TempDir::new().unwrap();
    let pool = setup(&dir).await;
    let corpus = dir.path().join("corpus");
    std::fs::remove_file(corpus.join("authors.tang.json")).unwrap();

    assert!(run_import(&pool, &layout(&corpus)).await.is_err());
}

#[tokio::test]
async fn test_malformed_shard_aborts() {
    let dir = TempDir::new().unwrap();
    let pool = setup(&dir).await;
    let corpus = dir.path().join("corpus");
    std::fs::write(corpus.join("poet.tang.0.json"), "{not json").unwrap();

    assert!(run_import(&pool, &layout(&corpus)).await.is_err());
}
