//! Snapshot wire encoding.
//!
//! A snapshot travels as one JSON object:
//! `{ "<table>": [ { "<column>": <scalar>, ... }, ... ], ... }`.
//! No compression, no version field, no checksum. Message boundaries are not
//! this module's concern (see `replication::transport`).

use tracing::debug;

use super::Snapshot;
use crate::errors::{ReplicationError, TransferError};

pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>, ReplicationError> {
    let bytes = serde_json::to_vec(snapshot).map_err(|e| TransferError::EncodeFailed {
        reason: e.to_string(),
    })?;
    debug!(
        "Encoded snapshot: {} tables, {} rows, {} bytes",
        snapshot.table_count(),
        snapshot.row_count(),
        bytes.len()
    );
    Ok(bytes)
}

/// Decode a received message.
///
/// Anything that is not a table → rows mapping of scalar columns is rejected
/// as a whole; a failed decode never yields a partial snapshot.
pub fn decode(bytes: &[u8]) -> Result<Snapshot, ReplicationError> {
    serde_json::from_slice(bytes).map_err(|e| ReplicationError::MalformedSnapshot {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{row, Value};
    use rstest::rstest;

    #[test]
    fn test_decode_wire_shape() {
        let bytes = br#"{"ame_records":[{"id":1,"name":"X","weight":71.5,"remarks":null}],"prescriptions":[]}"#;
        let snapshot = decode(bytes).unwrap();

        assert_eq!(snapshot.table_count(), 2);
        let rows = snapshot.rows("ame_records").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], Value::Integer(1));
        assert_eq!(rows[0]["name"], Value::Text("X".to_string()));
        assert_eq!(rows[0]["weight"], Value::Real(71.5));
        assert_eq!(rows[0]["remarks"], Value::Null);
        assert!(snapshot.rows("prescriptions").unwrap().is_empty());
    }

    #[test]
    fn test_encode_produces_table_keyed_object() {
        let mut snapshot = Snapshot::new();
        snapshot.insert_table(
            "ame_records",
            vec![row([("id", Value::from(7)), ("name", Value::from("Y"))])],
        );

        let bytes = encode(&snapshot).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["ame_records"][0]["id"], 7);
        assert_eq!(json["ame_records"][0]["name"], "Y");
    }

    #[test]
    fn test_whole_floats_stay_real() {
        let mut snapshot = Snapshot::new();
        snapshot.insert_table("prescriptions", vec![row([("dose", Value::Real(2.0))])]);

        let decoded = decode(&encode(&snapshot).unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_integer_range_limits() {
        let snapshot =
            decode(br#"{"t":[{"max":9223372036854775807,"min":-9223372036854775808}]}"#).unwrap();
        let row = &snapshot.rows("t").unwrap()[0];
        assert_eq!(row["max"], Value::Integer(i64::MAX));
        assert_eq!(row["min"], Value::Integer(i64::MIN));
    }

    #[test]
    fn test_empty_object_is_empty_snapshot() {
        let snapshot = decode(b"{}").unwrap();
        assert_eq!(snapshot.table_count(), 0);
        assert!(snapshot.is_empty());
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::not_json(b"hello".as_slice())]
    #[case::truncated(br#"{"ame_records":[{"id":1"#.as_slice())]
    #[case::top_level_array(br#"[{"id":1}]"#.as_slice())]
    #[case::table_not_array(br#"{"ame_records":{"id":1}}"#.as_slice())]
    #[case::row_not_object(br#"{"ame_records":[1,2]}"#.as_slice())]
    #[case::bool_value(br#"{"ame_records":[{"id":1,"fit":true}]}"#.as_slice())]
    #[case::nested_value(br#"{"ame_records":[{"id":1,"meta":{"a":1}}]}"#.as_slice())]
    #[case::integer_too_large(br#"{"ame_records":[{"id":9223372036854775808}]}"#.as_slice())]
    #[case::invalid_utf8(b"{\"ame_records\":[{\"name\":\"\xff\"}]}".as_slice())]
    fn test_decode_rejects_malformed(#[case] bytes: &[u8]) {
        let result = decode(bytes);
        assert!(
            matches!(result, Err(ReplicationError::MalformedSnapshot { .. })),
            "expected MalformedSnapshot, got {:?}",
            result
        );
    }
}
