//! Domain service for watchlist/completed membership.

use thiserror::Error;

pub use crate::db::ListKind;

/// Errors specific to list operations.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ListError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ListError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result of an add: `AlreadyPresent` is a soft no-op, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Result of a remove, naming which list the row left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(ListKind),
    NotFound,
}

/// Domain service trait for list membership.
#[async_trait::async_trait]
pub trait ListService: Send + Sync {
    /// Adds a media id to one of the user's lists. Adding an id that is
    /// already present returns [`AddOutcome::AlreadyPresent`] and leaves the
    /// stored row untouched; at most one row ever exists per
    /// (user, media, list) even under concurrent adds.
    async fn add(
        &self,
        user_id: i32,
        media_id: i64,
        kind: ListKind,
    ) -> Result<AddOutcome, ListError>;

    /// Removes a media id from whichever list contains it. When the id is in
    /// both lists the finished entry is deleted first, deterministically;
    /// when it is in neither, [`RemoveOutcome::NotFound`] is returned.
    async fn remove(&self, user_id: i32, media_id: i64) -> Result<RemoveOutcome, ListError>;

    /// Media ids currently in the user's list, in insertion order.
    async fn list(&self, user_id: i32, kind: ListKind) -> Result<Vec<i64>, ListError>;
}
