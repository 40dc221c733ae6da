use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::list::ListKind;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn list_repo(&self) -> repositories::list::ListRepository {
        repositories::list::ListRepository::new(self.conn.clone())
    }

    /// Returns `None` when the username is already taken.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        avatar_url: &str,
    ) -> Result<Option<User>> {
        self.user_repo()
            .create(username, password_hash, avatar_url)
            .await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn add_list_item(&self, kind: ListKind, user_id: i32, media_id: i64) -> Result<bool> {
        self.list_repo().insert(kind, user_id, media_id).await
    }

    pub async fn contains_list_item(
        &self,
        kind: ListKind,
        user_id: i32,
        media_id: i64,
    ) -> Result<bool> {
        self.list_repo().contains(kind, user_id, media_id).await
    }

    pub async fn remove_list_item(
        &self,
        kind: ListKind,
        user_id: i32,
        media_id: i64,
    ) -> Result<bool> {
        self.list_repo().remove(kind, user_id, media_id).await
    }

    pub async fn list_membership(&self, kind: ListKind, user_id: i32) -> Result<Vec<i64>> {
        self.list_repo().list(kind, user_id).await
    }
}
