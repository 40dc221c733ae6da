use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::clients::tmdb::{MediaSummary, MovieDetail, TvDetail};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// GET /
/// Trending feed from the catalog
pub async fn trending(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MediaSummary>>>, ApiError> {
    let results = state
        .tmdb()
        .trending()
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(results)))
}

/// GET /movie/{id}
pub async fn movie_detail(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> Result<Json<ApiResponse<MovieDetail>>, ApiError> {
    let movie = state
        .tmdb()
        .movie(movie_id)
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Movie", movie_id))?;

    Ok(Json(ApiResponse::success(movie)))
}

/// GET /tv/{id}
pub async fn tv_detail(
    State(state): State<Arc<AppState>>,
    Path(series_id): Path<i64>,
) -> Result<Json<ApiResponse<TvDetail>>, ApiError> {
    let series = state
        .tmdb()
        .tv(series_id)
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Series", series_id))?;

    Ok(Json(ApiResponse::success(series)))
}

/// GET /search/multi/?query=<text>
pub async fn search_multi(
    State(state): State<Arc<AppState>>,
    Query(request): Query<SearchRequest>,
) -> Result<Json<ApiResponse<Vec<MediaSummary>>>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::validation("Search query is required"));
    }

    let results = state
        .tmdb()
        .search_multi(&request.query)
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(results)))
}
