//! Domain service for registration and authentication.
//!
//! Handles signup validation, password hashing, credential checks, and
//! resolving a session's stored user id back to a live user.

use thiserror::Error;

use crate::db::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username is taken")]
    UsernameTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new user, hashing the password before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for an empty username or a password
    /// shorter than the minimum, and [`AuthError::UsernameTaken`] when the
    /// username already exists (no row is created in that case).
    async fn signup(
        &self,
        username: &str,
        password: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, AuthError>;

    /// Verifies credentials and returns the user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for a wrong password and for
    /// an unknown username alike; the two cases are indistinguishable.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Resolves a stored user id to a live user. A stale id (the user no
    /// longer exists) resolves to `None` rather than an error, so callers
    /// treat it as an anonymous session.
    async fn resolve(&self, user_id: i32) -> Result<Option<User>, AuthError>;
}
