//! Poem browsing endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tangshi_common::db::models::Poem;
use tangshi_common::db::poems;

use crate::api::ApiError;
use crate::pagination::{calculate_pagination, PageQuery, Paged, PAGE_SIZE};
use crate::AppState;

/// GET /api/poems
pub async fn list_poems(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<Poem>>, ApiError> {
    let total = poems::count_poems(&state.db).await?;
    let pagination = calculate_pagination(total, query.page);

    let data = poems::list_poems(&state.db, PAGE_SIZE, pagination.offset).await?;

    Ok(Json(Paged::new(pagination, total, data)))
}

/// GET /api/poems/:id
pub async fn get_poem(
    State(state): State<AppState>,
    Path(poem_id): Path<i64>,
) -> Result<Json<Poem>, ApiError> {
    let poem = poems::get_poem(&state.db, poem_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Poem not found: {}", poem_id)))?;

    Ok(Json(poem))
}
