use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, UserDto};
use crate::constants::session::CURRENT_USER_KEY;
use crate::db::User;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Session-checking middleware for routes that require a logged-in user.
/// A session whose stored id no longer resolves to a live user counts as
/// anonymous, not as an error.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(Some(user_id)) = session.get::<i32>(CURRENT_USER_KEY).await
        && let Ok(Some(user)) = state.auth_service().resolve(user_id).await
    {
        tracing::Span::current().record("user_id", user.id);
        return Ok(next.run(request).await);
    }

    let response = (StatusCode::UNAUTHORIZED, "Unauthorized access");
    Ok(response.into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /signup
/// Register a new account and establish a session for it
pub async fn signup(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .auth_service()
        .signup(
            &payload.username,
            &payload.password,
            payload.avatar_url.as_deref(),
        )
        .await?;

    establish_session(&session, &user).await?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// POST /login
/// Authenticate with username and password, establishes a session on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .auth_service()
        .authenticate(&payload.username, &payload.password)
        .await?;

    establish_session(&session, &user).await?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// GET /logout
/// Invalidate the current session; a no-op for anonymous sessions
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /me
/// Get the current session's user (requires authentication)
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = current_user(&state, &session).await?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

// ============================================================================
// Helpers
// ============================================================================

/// Bind the session to a user. Re-login simply overwrites the binding.
async fn establish_session(session: &Session, user: &User) -> Result<(), ApiError> {
    session
        .insert(CURRENT_USER_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

/// Resolve the session to a live user, treating a missing or stale binding
/// as anonymous.
pub async fn current_user(state: &AppState, session: &Session) -> Result<User, ApiError> {
    let user_id = session
        .get::<i32>(CURRENT_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(ApiError::unauthorized)?;

    state
        .auth_service()
        .resolve(user_id)
        .await?
        .ok_or_else(ApiError::unauthorized)
}
