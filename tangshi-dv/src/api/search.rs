//! Fuzzy search endpoints
//!
//! LIKE-based matching on author names and on poem titles/content. Author
//! hits carry a first page of that author's poems plus the author's total
//! poem count, so the frontend can render result cards without extra round
//! trips.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tangshi_common::db::models::{Author, Poem};
use tangshi_common::db::{authors, poems};

use crate::api::ApiError;
use crate::pagination::{calculate_pagination, Paged, PAGE_SIZE};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// An author search hit with a preview of their poems.
#[derive(Debug, Serialize)]
pub struct AuthorHit {
    #[serde(flatten)]
    pub author: Author,
    pub poems: Vec<Poem>,
    pub total_poems: i64,
}

/// GET /api/search/authors?name=
pub async fn search_authors(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Paged<AuthorHit>>, ApiError> {
    if query.name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }

    let total = authors::count_authors_by_name(&state.db, &query.name).await?;
    let pagination = calculate_pagination(total, query.page);

    let hits = authors::search_authors(&state.db, &query.name, PAGE_SIZE, pagination.offset).await?;

    let mut data = Vec::with_capacity(hits.len());
    for author in hits {
        let total_poems = poems::count_poems_by_author(&state.db, author.author_id).await?;
        let preview = poems::poems_by_author(&state.db, author.author_id, PAGE_SIZE, 0).await?;
        data.push(AuthorHit {
            author,
            poems: preview,
            total_poems,
        });
    }

    Ok(Json(Paged::new(pagination, total, data)))
}

/// GET /api/search/poems?name=
pub async fn search_poems(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Paged<Poem>>, ApiError> {
    if query.name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }

    let total = poems::count_poems_by_text(&state.db, &query.name).await?;
    let pagination = calculate_pagination(total, query.page);

    let data = poems::search_poems(&state.db, &query.name, PAGE_SIZE, pagination.offset).await?;

    Ok(Json(Paged::new(pagination, total, data)))
}
