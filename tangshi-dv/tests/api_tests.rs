//! Integration tests for the tangshi-dv API endpoints
//!
//! Each test builds a small fixture store under a temp dir, reopens it
//! read-only, and drives the router directly with oneshot requests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use sqlx::SqlitePool;
use tangshi_common::db::init::{connect_readonly, init_database};
use tangshi_common::db::schema::ensure_column;
use tangshi_common::db::{authors, poems};
use tangshi_dv::{build_router, AppState};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Build a populated store and reopen it the way production does: read-only.
async fn setup_test_db(dir: &TempDir) -> SqlitePool {
    let db_path = dir.path().join("tangshi.db");

    let pool = init_database(&db_path).await.unwrap();
    ensure_column(&pool, "authors", "image_url", "TEXT").await.unwrap();

    authors::insert_author_ignore(&pool, "李白", "字太白，号青莲居士").await.unwrap();
    authors::insert_author_ignore(&pool, "杜甫", "字子美").await.unwrap();
    authors::insert_author_ignore(&pool, "王维", "字摩诘").await.unwrap();

    let ids = authors::author_id_map(&pool).await.unwrap();
    authors::update_image_url(&pool, ids["李白"], "https://img.example/libai.jpg")
        .await
        .unwrap();

    for i in 0..7 {
        poems::insert_poem(&pool, &format!("李白诗 {}", i), ids["李白"], "床前明月光，\n疑是地上霜。")
            .await
            .unwrap();
    }
    poems::insert_poem(&pool, "春望", ids["杜甫"], "国破山河在，\n城春草木深。")
        .await
        .unwrap();

    pool.close().await;
    connect_readonly(&db_path).await.unwrap()
}

fn setup_app(db: SqlitePool) -> axum::Router {
    build_router(AppState::new(db))
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(setup_test_db(&dir).await);

    let response = app.oneshot(test_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "tangshi-dv");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_list_authors_paged() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(setup_test_db(&dir).await);

    let response = app.oneshot(test_request("/api/authors")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 6);
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    // Enriched author carries its portrait; others stay null
    let li_bai = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["name"] == "李白")
        .unwrap();
    assert_eq!(li_bai["image_url"], "https://img.example/libai.jpg");
    let du_fu = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["name"] == "杜甫")
        .unwrap();
    assert!(du_fu["image_url"].is_null());
}

#[tokio::test]
async fn test_get_author_not_found() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(setup_test_db(&dir).await);

    let response = app.oneshot(test_request("/api/authors/9999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("9999"));
}

#[tokio::test]
async fn test_author_poems_pagination() {
    let dir = TempDir::new().unwrap();
    let db = setup_test_db(&dir).await;
    let ids = authors::author_id_map(&db).await.unwrap();
    let li_bai = ids["李白"];
    let app = setup_app(db);

    // 7 poems = 2 pages at page size 6
    let response = app
        .clone()
        .oneshot(test_request(&format!("/api/authors/{}/poems?page=2", li_bai)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["page"], 2);
    assert_eq!(body["total"], 7);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Out-of-bounds page clamps to the last page
    let response = app
        .oneshot(test_request(&format!("/api/authors/{}/poems?page=99", li_bai)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["page"], 2);
}

#[tokio::test]
async fn test_get_poem_content() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(setup_test_db(&dir).await);

    // 春望, percent-encoded
    let response = app
        .oneshot(test_request("/api/search/poems?name=%E6%98%A5%E6%9C%9B"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(
        body["data"][0]["content"],
        "国破山河在，\n城春草木深。"
    );
}

#[tokio::test]
async fn test_search_authors_carries_poem_preview() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(setup_test_db(&dir).await);

    let response = app
        .oneshot(test_request("/api/search/authors?name=%E6%9D%8E"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 1);
    let hit = &body["data"][0];
    assert_eq!(hit["name"], "李白");
    assert_eq!(hit["total_poems"], 7);
    // Preview is capped at one page
    assert_eq!(hit["poems"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_search_requires_name() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(setup_test_db(&dir).await);

    // Missing parameter is rejected by extraction
    let response = app
        .clone()
        .oneshot(test_request("/api/search/authors"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Empty parameter is rejected by the handler
    let response = app
        .oneshot(test_request("/api/search/authors?name="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_totals() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(setup_test_db(&dir).await);

    let response = app.oneshot(test_request("/api/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["data"]["poets"], 3);
    assert_eq!(body["data"]["poems"], 8);
    // 8 poems x 13 characters of content each (incl. the newline)
    assert_eq!(body["data"]["words"], 104);
}

#[tokio::test]
async fn test_author_stats_ordering() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(setup_test_db(&dir).await);

    let response = app.oneshot(test_request("/api/stats/authors")).await.unwrap();
    let body = extract_json(response.into_body()).await;

    let authors = body["data"]["authors"].as_array().unwrap();
    // 王维 has no poems and is omitted; 李白 leads on poem count
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0]["author_name"], "李白");
    assert_eq!(authors[0]["poem_count"], 7);
    assert_eq!(body["data"]["total_poems"], 8);
}
