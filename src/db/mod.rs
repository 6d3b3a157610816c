use crate::domain::FlavorId;
use crate::models::{Flavor, FlavorChanges, NewFlavor};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::flavor::FlavorRepository;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
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

        let in_memory = is_in_memory(db_url);

        if !in_memory && db_url.starts_with("sqlite:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // Every in-memory connection is its own database, so keep exactly one alive.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
            (max_connections, min_connections)
        };
        opt.max_connections(max_connections)
            .min_connections(min_connections);

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

    fn flavor_repo(&self) -> FlavorRepository {
        FlavorRepository::new(self.conn.clone())
    }

    pub async fn list_flavors(&self) -> Result<Vec<Flavor>> {
        self.flavor_repo().list().await
    }

    pub async fn get_flavor(&self, id: FlavorId) -> Result<Option<Flavor>> {
        self.flavor_repo().get(id).await
    }

    pub async fn create_flavor(&self, flavor: &NewFlavor) -> Result<Flavor> {
        self.flavor_repo().create(flavor).await
    }

    pub async fn update_flavor(
        &self,
        id: FlavorId,
        changes: &FlavorChanges,
    ) -> Result<Option<Flavor>> {
        self.flavor_repo().update(id, changes).await
    }

    pub async fn delete_flavor(&self, id: FlavorId) -> Result<bool> {
        self.flavor_repo().delete(id).await
    }

    pub async fn count_flavors(&self) -> Result<u64> {
        self.flavor_repo().count().await
    }

    pub async fn seed_flavors_if_empty(&self) -> Result<usize> {
        self.flavor_repo().seed_if_empty().await
    }
}
