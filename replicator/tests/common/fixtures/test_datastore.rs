//! Temporary datastores backed by a SQLite file in a temp dir

use anyhow::Result;
use replicator::database::TRACKED_TABLES;
use replicator::snapshot::{Row, Snapshot, Value};
use replicator::{Database, SnapshotExporter, SnapshotImporter};
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::TempDir;

/// One device's datastore, deleted when dropped
pub struct TestDatastore {
    _dir: TempDir,
    pub database: Arc<Database>,
}

impl TestDatastore {
    pub async fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("records.db");
        let database = Database::new(path.to_str().expect("temp path is utf-8")).await?;
        Ok(Self {
            _dir: dir,
            database: Arc::new(database),
        })
    }

    pub fn exporter(&self) -> SnapshotExporter {
        SnapshotExporter::new(self.database.clone())
    }

    pub fn importer(&self) -> SnapshotImporter {
        SnapshotImporter::new(self.database.clone())
    }

    /// Write rows straight into the datastore
    pub async fn seed(&self, table: &str, rows: Vec<Row>) -> Result<()> {
        let mut snapshot = Snapshot::new();
        snapshot.insert_table(table, rows);
        self.importer()
            .import(&snapshot)
            .await
            .map_err(|e| anyhow::anyhow!("seed failed: {}", e))?;
        Ok(())
    }

    pub async fn rows(&self, table: &str) -> Vec<Row> {
        let mut rows = self.database.scan_table(table).await.expect("scan");
        sort_by_id(&mut rows);
        rows
    }

    /// Every tracked table, rows ordered by id
    pub async fn dump(&self) -> BTreeMap<String, Vec<Row>> {
        let mut dump = BTreeMap::new();
        for table in TRACKED_TABLES.iter() {
            dump.insert(table.name.to_string(), self.rows(table.name).await);
        }
        dump
    }
}

pub fn sort_by_id(rows: &mut [Row]) {
    rows.sort_by_key(|row| match row.get("id") {
        Some(Value::Integer(id)) => *id,
        _ => i64::MIN,
    });
}

/// Only the columns a row actually carries, ignoring NULLs filled in by the table
pub fn non_null(row: &Row) -> Row {
    row.iter()
        .filter(|(_, v)| **v != Value::Null)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
