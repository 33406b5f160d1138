//! Common test data and row builders

use replicator::snapshot::{row, Row, Value};

/// Tracked table names
pub mod tables {
    pub const AME: &str = "ame_records";
    pub const LOW_MEDICAL: &str = "low_medical_records";
    pub const PRESCRIPTIONS: &str = "prescriptions";
}

/// Common peer names
pub mod peers {
    pub const TABLET_A: &str = "clinic-tablet-a";
    pub const TABLET_B: &str = "clinic-tablet-b";
}

pub fn ame_row(id: i64, name: &str) -> Row {
    row([("id", Value::from(id)), ("name", Value::from(name))])
}

pub fn full_ame_row(id: i64, name: &str, category: &str, weight_kg: f64) -> Row {
    row([
        ("id", Value::from(id)),
        ("name", Value::from(name)),
        ("service_number", Value::from(format!("SN-{:05}", id))),
        ("category", Value::from(category)),
        ("weight_kg", Value::from(weight_kg)),
        ("remarks", Value::Null),
    ])
}

pub fn low_medical_row(id: i64, category: &str) -> Row {
    row([("id", Value::from(id)), ("category", Value::from(category))])
}

pub fn prescription_row(id: i64, medication: &str, duration_days: i64) -> Row {
    row([
        ("id", Value::from(id)),
        ("patient_name", Value::from("Patient")),
        ("medication", Value::from(medication)),
        ("duration_days", Value::from(duration_days)),
    ])
}
