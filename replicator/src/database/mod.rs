//! Local datastore for the replicated records.
//!
//! This module provides SQLite persistence for the tracked tables:
//! - `ame_records` - medical examination records
//! - `low_medical_records` - low medical category records
//! - `prescriptions` - prescriptions
//!
//! The module is organized into submodules:
//! - `schema` - Fixed table definitions shared by both peers
//! - `tables` - Generic whole-table scans and keyed upserts

pub mod schema;
mod tables;

pub use schema::{TableSchema, TRACKED_TABLES};
pub use tables::{upsert_row, TableCount};

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool, Transaction};
use std::path::Path;
use tracing::{error, info};

pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Expose pool for integration test queries
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn new(database_path: &str) -> Result<Self> {
        info!("Opening datastore at {}", database_path);

        if let Some(parent) = Path::new(database_path).parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                error!("Failed to create parent directory {:?}: {}", parent, e);
                return Err(e.into());
            }
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path);
        let pool = match SqlitePool::connect(&database_url).await {
            Ok(pool) => pool,
            Err(e) => {
                error!("Failed to connect to database {}: {}", database_url, e);
                return Err(e.into());
            }
        };

        let database = Self { pool };
        database.initialize_tables().await?;
        database.verify_tables().await?;

        info!("Datastore ready with {} tracked tables", TRACKED_TABLES.len());
        Ok(database)
    }

    async fn initialize_tables(&self) -> Result<()> {
        for table in TRACKED_TABLES.iter() {
            if let Err(e) = sqlx::query(table.create_sql).execute(&self.pool).await {
                error!("Failed to create {} table: {}", table.name, e);
                return Err(e.into());
            }
            info!("{} table ready", table.name);
        }
        Ok(())
    }

    async fn verify_tables(&self) -> Result<()> {
        let existing: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table'")
                .fetch_all(&self.pool)
                .await?;

        let missing: Vec<&str> = TRACKED_TABLES
            .iter()
            .map(|t| t.name)
            .filter(|name| !existing.iter().any(|e| e == name))
            .collect();

        if !missing.is_empty() {
            error!("Tracked tables missing after initialization: {:?}", missing);
            return Err(anyhow::anyhow!(
                "Database tables not properly created: {:?}",
                missing
            ));
        }
        Ok(())
    }

    /// Open a transaction; dropping it without commit rolls back
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
