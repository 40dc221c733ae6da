use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// List membership used to be guarded only by an application-level existence
/// check, which lets two concurrent adds insert the same (user, media) pair.
/// Dedupe any rows that slipped through and back the invariant with unique
/// indexes.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared(
            "DELETE FROM saved_items WHERE rowid NOT IN (SELECT MIN(rowid) FROM saved_items GROUP BY user_id, media_id)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_saved_items_user_media ON saved_items(user_id, media_id)",
        )
        .await?;

        conn.execute_unprepared(
            "DELETE FROM finished_items WHERE rowid NOT IN (SELECT MIN(rowid) FROM finished_items GROUP BY user_id, media_id)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_finished_items_user_media ON finished_items(user_id, media_id)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_saved_items_user_media")
            .await?;

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_finished_items_user_media")
            .await?;

        Ok(())
    }
}
