//! Generic table operations used by replication.
//!
//! Rows are handled as column → scalar maps rather than typed records, so the
//! same code serves every tracked table.

use anyhow::Result;
use futures::future::join_all;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, Sqlite, Transaction, TypeInfo, ValueRef};
use tracing::debug;

use super::schema::{find_table, TableSchema, TRACKED_TABLES};
use super::Database;
use crate::errors::DatabaseError;
use crate::snapshot::{Row, Value};

#[derive(Debug, Clone, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}

impl Database {
    /// Unordered full scan of a tracked table, rows as stored
    pub async fn scan_table(&self, table: &str) -> Result<Vec<Row>, DatabaseError> {
        let schema = find_table(table).ok_or_else(|| DatabaseError::UnknownTable {
            table: table.to_string(),
        })?;

        let sql = format!("SELECT * FROM {}", quote_identifier(schema.name));
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::ScanFailed {
                table: table.to_string(),
                reason: e.to_string(),
            })?;

        let decoded = rows
            .iter()
            .map(|row| decode_row(table, row))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Scanned {} rows from {}", decoded.len(), table);
        Ok(decoded)
    }

    pub async fn count_rows(&self, table: &str) -> Result<i64> {
        let schema = find_table(table)
            .ok_or_else(|| anyhow::anyhow!("Table {} is not replicated", table))?;
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(schema.name));
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    pub async fn table_counts(&self) -> Result<Vec<TableCount>> {
        let tasks = TRACKED_TABLES.iter().map(|table| async move {
            let rows = self.count_rows(table.name).await?;
            Ok::<_, anyhow::Error>(TableCount {
                table: table.name.to_string(),
                rows,
            })
        });

        join_all(tasks).await.into_iter().collect()
    }
}

/// Insert a row, or replace the whole stored row on a primary key conflict.
///
/// Column names must already be checked against `schema`.
pub async fn upsert_row(
    tx: &mut Transaction<'_, Sqlite>,
    schema: &TableSchema,
    row: &Row,
) -> Result<(), sqlx::Error> {
    let columns: Vec<String> = row.keys().map(|c| quote_identifier(c)).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
        quote_identifier(schema.name),
        columns.join(", "),
        placeholders
    );

    let mut query = sqlx::query(&sql);
    for value in row.values() {
        query = match value {
            Value::Null => query.bind(None::<String>),
            Value::Integer(v) => query.bind(*v),
            Value::Real(v) => query.bind(*v),
            Value::Text(v) => query.bind(v.as_str()),
        };
    }

    query.execute(&mut **tx).await?;
    Ok(())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn decode_row(table: &str, row: &SqliteRow) -> Result<Row, DatabaseError> {
    let scan_failed = |e: sqlx::Error| DatabaseError::ScanFailed {
        table: table.to_string(),
        reason: e.to_string(),
    };

    let mut decoded = Row::new();
    for (index, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(index).map_err(scan_failed)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_info = raw.type_info();
            match type_info.name() {
                "INTEGER" => Value::Integer(row.try_get_unchecked::<i64, _>(index).map_err(scan_failed)?),
                "REAL" => {
                    let v = row.try_get_unchecked::<f64, _>(index).map_err(scan_failed)?;
                    // JSON has no representation for inf or NaN
                    if !v.is_finite() {
                        return Err(DatabaseError::UnsupportedValue {
                            table: table.to_string(),
                            column: column.name().to_string(),
                            type_name: format!("REAL ({})", v),
                        });
                    }
                    Value::Real(v)
                }
                "TEXT" => Value::Text(row.try_get_unchecked::<String, _>(index).map_err(scan_failed)?),
                other => {
                    return Err(DatabaseError::UnsupportedValue {
                        table: table.to_string(),
                        column: column.name().to_string(),
                        type_name: other.to_string(),
                    })
                }
            }
        };
        decoded.insert(column.name().to_string(), value);
    }
    Ok(decoded)
}
