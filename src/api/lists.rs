use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::types::{AddItemDto, FinishedItemDto, FinishedListDto, RemoveItemDto, SavedListDto};
use super::{ApiError, ApiResponse, AppState, UserDto, auth};
use crate::services::{AddOutcome, ListKind, RemoveOutcome};

/// GET /watchlist-tv/{user_id}
/// A user's saved list with each stored id resolved against both catalog
/// detail endpoints (the id alone does not say movie or series)
pub async fn saved_list(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<SavedListDto>>, ApiError> {
    let owner = state
        .auth_service()
        .resolve(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", user_id))?;

    let media_ids = state.list_service().list(owner.id, ListKind::Saved).await?;

    let items = state
        .tmdb()
        .resolve_batch(&media_ids)
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(SavedListDto {
        user: UserDto::from(owner),
        items,
    })))
}

/// GET /watchlist-movie/{user_id}
/// A user's finished list with per-item movie details
pub async fn finished_list(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<FinishedListDto>>, ApiError> {
    let owner = state
        .auth_service()
        .resolve(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", user_id))?;

    let media_ids = state
        .list_service()
        .list(owner.id, ListKind::Finished)
        .await?;

    let items = state
        .tmdb()
        .movie_batch(&media_ids)
        .await
        .map_err(|e| ApiError::tmdb_error(e.to_string()))?
        .into_iter()
        .map(|(media_id, movie)| FinishedItemDto { media_id, movie })
        .collect();

    Ok(Json(ApiResponse::success(FinishedListDto {
        user: UserDto::from(owner),
        items,
    })))
}

/// POST /watchlist/add/{media_id}
pub async fn add_saved(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(media_id): Path<i64>,
) -> Result<Json<ApiResponse<AddItemDto>>, ApiError> {
    add_item(&state, &session, media_id, ListKind::Saved).await
}

/// POST /completed/add/{media_id}
pub async fn add_finished(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(media_id): Path<i64>,
) -> Result<Json<ApiResponse<AddItemDto>>, ApiError> {
    add_item(&state, &session, media_id, ListKind::Finished).await
}

/// POST /delete/{media_id}
/// Remove the id from whichever list contains it, reporting which one
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(media_id): Path<i64>,
) -> Result<Json<ApiResponse<RemoveItemDto>>, ApiError> {
    let user = auth::current_user(&state, &session).await?;

    match state.list_service().remove(user.id, media_id).await? {
        RemoveOutcome::Removed(kind) => Ok(Json(ApiResponse::success(RemoveItemDto {
            media_id,
            removed_from: kind.as_str().to_string(),
        }))),
        RemoveOutcome::NotFound => Err(ApiError::not_found("List item", media_id)),
    }
}

async fn add_item(
    state: &AppState,
    session: &Session,
    media_id: i64,
    kind: ListKind,
) -> Result<Json<ApiResponse<AddItemDto>>, ApiError> {
    let user = auth::current_user(state, session).await?;

    let outcome = state.list_service().add(user.id, media_id, kind).await?;

    Ok(Json(ApiResponse::success(AddItemDto {
        media_id,
        list: kind.as_str().to_string(),
        already_present: matches!(outcome, AddOutcome::AlreadyPresent),
    })))
}
