//! Central repository for replication constants
//!
//! Ports, table names and tracker limits live here so the listener, the client
//! and the control API agree on them.

use std::time::Duration;

/// Wire-level constants shared by both peers
pub mod replication {
    /// Port the replication listener binds on every device
    pub const DEFAULT_PORT: u16 = 5555;

    /// Initial capacity of the per-connection receive buffer
    pub const RECEIVE_BUFFER_CAPACITY: usize = 64 * 1024;
}

/// Control API defaults
pub mod control {
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8096;
}

/// Names of the tracked tables
pub mod tables {
    pub const AME_RECORDS: &str = "ame_records";
    pub const LOW_MEDICAL_RECORDS: &str = "low_medical_records";
    pub const PRESCRIPTIONS: &str = "prescriptions";
}

/// Transfer tracker limits
pub mod transfers {
    /// Finished transfers kept in memory for the UI
    pub const HISTORY_LIMIT: usize = 100;

    /// Hours after which an outbound transfer still marked active is dropped
    pub const STUCK_TRANSFER_HOURS: i64 = 6;
}

/// Interval of the background tracker cleanup task
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(600);
