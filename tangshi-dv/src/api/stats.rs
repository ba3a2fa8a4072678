//! Corpus statistics endpoints
//!
//! Totals and per-author counts for the frontend's dashboard tables and
//! charts, computed with SQL aggregates.

use axum::{extract::State, Json};
use serde::Serialize;
use tangshi_common::db::models::{AuthorStats, CorpusStats};
use tangshi_common::db::poems;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub data: CorpusStats,
}

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let data = poems::corpus_stats(&state.db).await?;
    Ok(Json(StatsResponse { data }))
}

#[derive(Debug, Serialize)]
pub struct AuthorStatsData {
    pub authors: Vec<AuthorStats>,
    pub total_poems: i64,
    pub total_words: i64,
}

#[derive(Debug, Serialize)]
pub struct AuthorStatsResponse {
    pub data: AuthorStatsData,
}

/// GET /api/stats/authors
pub async fn get_author_stats(
    State(state): State<AppState>,
) -> Result<Json<AuthorStatsResponse>, ApiError> {
    let authors = poems::author_stats(&state.db).await?;

    let total_poems = authors.iter().map(|a| a.poem_count).sum();
    let total_words = authors.iter().map(|a| a.word_count).sum();

    Ok(Json(AuthorStatsResponse {
        data: AuthorStatsData {
            authors,
            total_poems,
            total_words,
        },
    }))
}
