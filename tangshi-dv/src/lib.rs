//! tangshi-dv library - Data View module
//!
//! Read-only HTTP API over the populated poetry store: paged browsing,
//! fuzzy search, and corpus statistics. All writes belong to the import and
//! enrichment services; this module opens the database read-only.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/authors", get(api::list_authors))
        .route("/api/authors/:id", get(api::get_author))
        .route("/api/authors/:id/poems", get(api::get_author_poems))
        .route("/api/poems", get(api::list_poems))
        .route("/api/poems/:id", get(api::get_poem))
        .route("/api/search/authors", get(api::search_authors))
        .route("/api/search/poems", get(api::search_poems))
        .route("/api/stats", get(api::get_stats))
        .route("/api/stats/authors", get(api::get_author_stats))
        .merge(api::health_routes())
        // The browser frontend is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
