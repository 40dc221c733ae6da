//! `SeaORM` implementation of the `ListService` trait.

use async_trait::async_trait;

use crate::db::{ListKind, Store};
use crate::services::list_service::{AddOutcome, ListError, ListService, RemoveOutcome};

pub struct SeaOrmListService {
    store: Store,
}

impl SeaOrmListService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ListService for SeaOrmListService {
    async fn add(
        &self,
        user_id: i32,
        media_id: i64,
        kind: ListKind,
    ) -> Result<AddOutcome, ListError> {
        if self
            .store
            .contains_list_item(kind, user_id, media_id)
            .await?
        {
            return Ok(AddOutcome::AlreadyPresent);
        }

        // A concurrent add can still slip past the check above; the unique
        // index rejects the duplicate row and the insert reports it.
        let inserted = self.store.add_list_item(kind, user_id, media_id).await?;

        if inserted {
            tracing::info!(
                "Added media {} to {} list of user {}",
                media_id,
                kind.as_str(),
                user_id
            );
            Ok(AddOutcome::Added)
        } else {
            Ok(AddOutcome::AlreadyPresent)
        }
    }

    async fn remove(&self, user_id: i32, media_id: i64) -> Result<RemoveOutcome, ListError> {
        // The stored id does not say which list it is in; try finished first,
        // then saved, so a row present in both is removed deterministically.
        for kind in [ListKind::Finished, ListKind::Saved] {
            if self.store.remove_list_item(kind, user_id, media_id).await? {
                tracing::info!(
                    "Removed media {} from {} list of user {}",
                    media_id,
                    kind.as_str(),
                    user_id
                );
                return Ok(RemoveOutcome::Removed(kind));
            }
        }

        Ok(RemoveOutcome::NotFound)
    }

    async fn list(&self, user_id: i32, kind: ListKind) -> Result<Vec<i64>, ListError> {
        let media_ids = self.store.list_membership(kind, user_id).await?;
        Ok(media_ids)
    }
}
