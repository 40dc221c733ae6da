//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tokio::task;

use crate::constants::{DEFAULT_AVATAR_URL, limits};
use crate::db::{Store, User};
use crate::db::repositories::user::hash_password;
use crate::services::auth_service::{AuthError, AuthService};

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn signup(
        &self,
        username: &str,
        password: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }

        if password.chars().count() < limits::MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                limits::MIN_PASSWORD_LEN
            )));
        }

        let avatar_url = match avatar_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => DEFAULT_AVATAR_URL.to_string(),
        };

        // Hash on a blocking thread; Argon2 is deliberately expensive
        let password = password.to_string();
        let password_hash = task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task panicked: {e}")))??;

        let user = self
            .store
            .create_user(username, &password_hash, &avatar_url)
            .await?
            .ok_or(AuthError::UsernameTaken)?;

        tracing::info!("Registered new user: {}", user.username);

        Ok(user)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let is_valid = self.store.verify_user_password(username, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(user)
    }

    async fn resolve(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        let user = self.store.get_user_by_id(user_id).await?;
        Ok(user)
    }
}
