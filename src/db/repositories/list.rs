use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use crate::entities::prelude::*;
use crate::entities::{finished_items, saved_items};

/// Which of the two per-user membership sets an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Saved,
    Finished,
}

impl ListKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Finished => "finished",
        }
    }
}

/// Repository for watchlist/completed membership rows
pub struct ListRepository {
    conn: DatabaseConnection,
}

impl ListRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a membership row. Returns `false` when the unique index on
    /// (`user_id`, `media_id`) rejected a duplicate, `true` otherwise.
    pub async fn insert(&self, kind: ListKind, user_id: i32, media_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().to_rfc3339();

        let res = match kind {
            ListKind::Saved => SavedItems::insert(saved_items::ActiveModel {
                user_id: Set(user_id),
                media_id: Set(media_id),
                created_at: Set(now),
                ..Default::default()
            })
            .exec(&self.conn)
            .await
            .map(|_| ()),
            ListKind::Finished => FinishedItems::insert(finished_items::ActiveModel {
                user_id: Set(user_id),
                media_id: Set(media_id),
                created_at: Set(now),
                ..Default::default()
            })
            .exec(&self.conn)
            .await
            .map(|_| ()),
        };

        match res {
            Ok(()) => Ok(true),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(false)
            }
            Err(err) => Err(err).context("Failed to insert list item"),
        }
    }

    pub async fn contains(&self, kind: ListKind, user_id: i32, media_id: i64) -> Result<bool> {
        let count = match kind {
            ListKind::Saved => {
                SavedItems::find()
                    .filter(saved_items::Column::UserId.eq(user_id))
                    .filter(saved_items::Column::MediaId.eq(media_id))
                    .count(&self.conn)
                    .await
            }
            ListKind::Finished => {
                FinishedItems::find()
                    .filter(finished_items::Column::UserId.eq(user_id))
                    .filter(finished_items::Column::MediaId.eq(media_id))
                    .count(&self.conn)
                    .await
            }
        }
        .context("Failed to query list membership")?;

        Ok(count > 0)
    }

    /// Delete a membership row if present. Returns whether a row was deleted.
    pub async fn remove(&self, kind: ListKind, user_id: i32, media_id: i64) -> Result<bool> {
        let result = match kind {
            ListKind::Saved => {
                SavedItems::delete_many()
                    .filter(saved_items::Column::UserId.eq(user_id))
                    .filter(saved_items::Column::MediaId.eq(media_id))
                    .exec(&self.conn)
                    .await
            }
            ListKind::Finished => {
                FinishedItems::delete_many()
                    .filter(finished_items::Column::UserId.eq(user_id))
                    .filter(finished_items::Column::MediaId.eq(media_id))
                    .exec(&self.conn)
                    .await
            }
        }
        .context("Failed to delete list item")?;

        Ok(result.rows_affected > 0)
    }

    /// Media ids for one user's list, in insertion order.
    pub async fn list(&self, kind: ListKind, user_id: i32) -> Result<Vec<i64>> {
        let media_ids = match kind {
            ListKind::Saved => SavedItems::find()
                .filter(saved_items::Column::UserId.eq(user_id))
                .order_by_asc(saved_items::Column::Id)
                .all(&self.conn)
                .await
                .map(|rows| rows.into_iter().map(|r| r.media_id).collect()),
            ListKind::Finished => FinishedItems::find()
                .filter(finished_items::Column::UserId.eq(user_id))
                .order_by_asc(finished_items::Column::Id)
                .all(&self.conn)
                .await
                .map(|rows| rows.into_iter().map(|r| r.media_id).collect()),
        }
        .context("Failed to list membership rows")?;

        Ok(media_ids)
    }
}
