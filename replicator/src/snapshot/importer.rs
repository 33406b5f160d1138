//! Snapshot import into the local datastore.
//!
//! The whole snapshot is applied in a single transaction: either every row of
//! every known table lands, or nothing does. Rows are applied in their
//! original order with `INSERT OR REPLACE`, so a stored row with the same
//! primary key is replaced entirely by the incoming one (last writer wins, no
//! column merge, no timestamp comparison).
//!
//! Serialization against other writers is left to SQLite's own locking.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::{Row, Snapshot};
use crate::database::schema::{find_table, TableSchema};
use crate::database::{upsert_row, Database};
use crate::errors::{ImportError, ReplicationError};

#[derive(Debug, Clone, Serialize)]
pub struct TableImport {
    pub table: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub tables: Vec<TableImport>,
    /// Tables in the snapshot that are not replicated here
    pub ignored_tables: Vec<String>,
}

impl ImportSummary {
    pub fn rows_applied(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

pub struct SnapshotImporter {
    database: Arc<Database>,
}

impl SnapshotImporter {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    pub async fn import(&self, snapshot: &Snapshot) -> Result<ImportSummary, ReplicationError> {
        let mut summary = ImportSummary::default();
        let plan = plan_import(snapshot, &mut summary)?;

        let mut tx = self.database.begin().await.map_err(|e| {
            error!("Failed to open import transaction: {}", e);
            ImportError::TransactionFailed {
                reason: e.to_string(),
            }
        })?;

        for (schema, rows) in &plan {
            for (index, row) in rows.iter().enumerate() {
                if let Err(e) = upsert_row(&mut tx, schema, row).await {
                    error!(
                        "Upsert of row {} into {} failed, rolling back import: {}",
                        index, schema.name, e
                    );
                    if let Err(rollback_err) = tx.rollback().await {
                        warn!("Explicit rollback failed: {}", rollback_err);
                    }
                    return Err(ImportError::StatementFailed {
                        table: schema.name.to_string(),
                        index,
                        reason: e.to_string(),
                    }
                    .into());
                }
            }
            debug!("Applied {} rows to {}", rows.len(), schema.name);
            summary.tables.push(TableImport {
                table: schema.name.to_string(),
                rows: rows.len(),
            });
        }

        tx.commit().await.map_err(|e| {
            error!("Failed to commit import: {}", e);
            ImportError::TransactionFailed {
                reason: e.to_string(),
            }
        })?;

        info!(
            "Imported snapshot: {} rows across {} tables",
            summary.rows_applied(),
            summary.tables.len()
        );
        Ok(summary)
    }
}

/// Resolve tables against the schema and check every row before any write.
fn plan_import<'a>(
    snapshot: &'a Snapshot,
    summary: &mut ImportSummary,
) -> Result<Vec<(&'static TableSchema, &'a [Row])>, ReplicationError> {
    let mut plan = Vec::new();

    for (table, rows) in snapshot.tables() {
        let Some(schema) = find_table(table) else {
            warn!("Ignoring unknown table {} ({} rows)", table, rows.len());
            summary.ignored_tables.push(table.to_string());
            continue;
        };

        for (index, row) in rows.iter().enumerate() {
            if row.is_empty() {
                error!("Row {} of {} has no columns, rejecting import", index, table);
                return Err(ImportError::EmptyRow {
                    table: table.to_string(),
                    index,
                }
                .into());
            }
            if let Some(column) = row.keys().find(|c| !schema.has_column(c.as_str())) {
                error!(
                    "Row {} of {} has unknown column {}, rejecting import",
                    index, table, column
                );
                return Err(ImportError::UnknownColumn {
                    table: table.to_string(),
                    column: column.clone(),
                }
                .into());
            }
        }

        plan.push((schema, rows));
    }

    Ok(plan)
}
