//! Schema of the replicated tables.
//!
//! The table set is fixed and identical on both peers; nothing about it is
//! negotiated on the wire. Every table is keyed by `id`, which is what the
//! importer's `INSERT OR REPLACE` resolves conflicts on.

use crate::constants::tables;

#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub create_sql: &'static str,
}

impl TableSchema {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }
}

pub const AME_RECORDS: TableSchema = TableSchema {
    name: tables::AME_RECORDS,
    columns: &[
        "id",
        "name",
        "service_number",
        "rank",
        "unit",
        "exam_date",
        "category",
        "height_cm",
        "weight_kg",
        "blood_pressure",
        "remarks",
        "updated_at",
    ],
    create_sql: r#"
        CREATE TABLE IF NOT EXISTS ame_records (
            id INTEGER PRIMARY KEY,
            name TEXT,
            service_number TEXT,
            rank TEXT,
            unit TEXT,
            exam_date TEXT,
            category TEXT,
            height_cm REAL,
            weight_kg REAL,
            blood_pressure TEXT,
            remarks TEXT,
            updated_at TEXT
        )
    "#,
};

pub const LOW_MEDICAL_RECORDS: TableSchema = TableSchema {
    name: tables::LOW_MEDICAL_RECORDS,
    columns: &[
        "id",
        "name",
        "service_number",
        "unit",
        "category",
        "diagnosis",
        "valid_from",
        "valid_until",
        "remarks",
        "updated_at",
    ],
    create_sql: r#"
        CREATE TABLE IF NOT EXISTS low_medical_records (
            id INTEGER PRIMARY KEY,
            name TEXT,
            service_number TEXT,
            unit TEXT,
            category TEXT,
            diagnosis TEXT,
            valid_from TEXT,
            valid_until TEXT,
            remarks TEXT,
            updated_at TEXT
        )
    "#,
};

pub const PRESCRIPTIONS: TableSchema = TableSchema {
    name: tables::PRESCRIPTIONS,
    columns: &[
        "id",
        "patient_name",
        "service_number",
        "medication",
        "dosage",
        "frequency",
        "duration_days",
        "prescribed_on",
        "prescribed_by",
        "notes",
        "updated_at",
    ],
    create_sql: r#"
        CREATE TABLE IF NOT EXISTS prescriptions (
            id INTEGER PRIMARY KEY,
            patient_name TEXT,
            service_number TEXT,
            medication TEXT,
            dosage TEXT,
            frequency TEXT,
            duration_days INTEGER,
            prescribed_on TEXT,
            prescribed_by TEXT,
            notes TEXT,
            updated_at TEXT
        )
    "#,
};

/// Every replicated table, in export order
pub static TRACKED_TABLES: [TableSchema; 3] = [AME_RECORDS, LOW_MEDICAL_RECORDS, PRESCRIPTIONS];

pub fn find_table(name: &str) -> Option<&'static TableSchema> {
    TRACKED_TABLES.iter().find(|t| t.name == name)
}
