//! Author browsing endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tangshi_common::db::models::{Author, Poem};
use tangshi_common::db::{authors, poems};

use crate::api::ApiError;
use crate::pagination::{calculate_pagination, PageQuery, Paged, PAGE_SIZE};
use crate::AppState;

/// GET /api/authors
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<Author>>, ApiError> {
    let total = authors::count_authors(&state.db).await?;
    let pagination = calculate_pagination(total, query.page);

    let data = authors::list_authors(&state.db, PAGE_SIZE, pagination.offset).await?;

    Ok(Json(Paged::new(pagination, total, data)))
}

/// GET /api/authors/:id
pub async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
) -> Result<Json<Author>, ApiError> {
    let author = authors::get_author(&state.db, author_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Author not found: {}", author_id)))?;

    Ok(Json(author))
}

/// GET /api/authors/:id/poems
pub async fn get_author_poems(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<Poem>>, ApiError> {
    if authors::get_author(&state.db, author_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Author not found: {}", author_id)));
    }

    let total = poems::count_poems_by_author(&state.db, author_id).await?;
    let pagination = calculate_pagination(total, query.page);

    let data =
        poems::poems_by_author(&state.db, author_id, PAGE_SIZE, pagination.offset).await?;

    Ok(Json(Paged::new(pagination, total, data)))
}
