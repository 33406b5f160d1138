//! Error types for the replication core
//!
//! Every failure is recovered at the component boundary where it happens:
//! the listener and importer log and swallow, the client and the sync service
//! surface the error to the caller. None of them is fatal to the process.

use std::fmt;

/// Main error type for replication operations
#[derive(Debug)]
pub enum ReplicationError {
    /// Peer discovery or link establishment failed
    Link(LinkError),

    /// Connection drop or write failure while sending
    Transfer(TransferError),

    /// Received bytes do not parse into a snapshot
    MalformedSnapshot { reason: String },

    /// Applying a snapshot failed and was rolled back
    Import(ImportError),

    /// Local datastore errors outside of an import
    Database(DatabaseError),

    /// Configuration errors
    Config(ConfigError),
}

/// Link service error variants
#[derive(Debug)]
pub enum LinkError {
    /// Peer name is not known to the link service
    UnknownPeer { peer_name: String },

    /// Peer is known but disabled
    PeerDisabled { peer_name: String },

    /// Peer address could not be resolved
    ResolveFailed { address: String, reason: String },
}

/// Transfer error variants
#[derive(Debug)]
pub enum TransferError {
    /// Connection to the peer's listener could not be opened
    ConnectFailed { address: String, reason: String },

    /// Bytes could not be written in full
    WriteFailed { address: String, reason: String },

    /// Inbound connection dropped before the sender half-closed
    ReadFailed { address: String, reason: String },

    /// Snapshot could not be serialized
    EncodeFailed { reason: String },

    /// An outbound transfer to this peer is already running
    PeerBusy { peer_name: String },
}

/// Import error variants
#[derive(Debug)]
pub enum ImportError {
    /// Row carries a column the target table does not have
    UnknownColumn { table: String, column: String },

    /// Row has no columns at all
    EmptyRow { table: String, index: usize },

    /// Upsert statement failed
    StatementFailed {
        table: String,
        index: usize,
        reason: String,
    },

    /// Transaction could not be opened or committed
    TransactionFailed { reason: String },
}

/// Database error variants
#[derive(Debug)]
pub enum DatabaseError {
    /// Table is not one of the tracked tables
    UnknownTable { table: String },

    /// Table scan failed
    ScanFailed { table: String, reason: String },

    /// Stored value has no scalar representation
    UnsupportedValue {
        table: String,
        column: String,
        type_name: String,
    },
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

impl fmt::Display for ReplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplicationError::Link(e) => write!(f, "Link error: {}", e),
            ReplicationError::Transfer(e) => write!(f, "Transfer error: {}", e),
            ReplicationError::MalformedSnapshot { reason } => {
                write!(f, "Malformed snapshot: {}", reason)
            }
            ReplicationError::Import(e) => write!(f, "Import error: {}", e),
            ReplicationError::Database(e) => write!(f, "Database error: {}", e),
            ReplicationError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::UnknownPeer { peer_name } => write!(f, "Peer '{}' not found", peer_name),
            LinkError::PeerDisabled { peer_name } => {
                write!(f, "Peer '{}' is disabled", peer_name)
            }
            LinkError::ResolveFailed { address, reason } => {
                write!(f, "Failed to resolve '{}': {}", address, reason)
            }
        }
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::ConnectFailed { address, reason } => {
                write!(f, "Connection to {} failed: {}", address, reason)
            }
            TransferError::WriteFailed { address, reason } => {
                write!(f, "Write to {} failed: {}", address, reason)
            }
            TransferError::ReadFailed { address, reason } => {
                write!(f, "Read from {} failed: {}", address, reason)
            }
            TransferError::EncodeFailed { reason } => {
                write!(f, "Failed to encode snapshot: {}", reason)
            }
            TransferError::PeerBusy { peer_name } => {
                write!(f, "A transfer to '{}' is already in progress", peer_name)
            }
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnknownColumn { table, column } => {
                write!(f, "Table '{}' has no column '{}'", table, column)
            }
            ImportError::EmptyRow { table, index } => {
                write!(f, "Row {} of '{}' has no columns", index, table)
            }
            ImportError::StatementFailed {
                table,
                index,
                reason,
            } => {
                write!(f, "Upsert of row {} into '{}' failed: {}", index, table, reason)
            }
            ImportError::TransactionFailed { reason } => {
                write!(f, "Transaction failed: {}", reason)
            }
        }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::UnknownTable { table } => {
                write!(f, "Table '{}' is not replicated", table)
            }
            DatabaseError::ScanFailed { table, reason } => {
                write!(f, "Scan of '{}' failed: {}", table, reason)
            }
            DatabaseError::UnsupportedValue {
                table,
                column,
                type_name,
            } => {
                write!(
                    f,
                    "Column '{}' of '{}' holds unsupported type {}",
                    column, table, type_name
                )
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ReplicationError {}
impl std::error::Error for LinkError {}
impl std::error::Error for TransferError {}
impl std::error::Error for ImportError {}
impl std::error::Error for DatabaseError {}
impl std::error::Error for ConfigError {}

impl From<LinkError> for ReplicationError {
    fn from(err: LinkError) -> Self {
        ReplicationError::Link(err)
    }
}

impl From<TransferError> for ReplicationError {
    fn from(err: TransferError) -> Self {
        ReplicationError::Transfer(err)
    }
}

impl From<ImportError> for ReplicationError {
    fn from(err: ImportError) -> Self {
        ReplicationError::Import(err)
    }
}

impl From<DatabaseError> for ReplicationError {
    fn from(err: DatabaseError) -> Self {
        ReplicationError::Database(err)
    }
}

impl From<ConfigError> for ReplicationError {
    fn from(err: ConfigError) -> Self {
        ReplicationError::Config(err)
    }
}

impl ReplicationError {
    /// Short machine-readable kind, used in transfer history and API responses
    pub fn kind(&self) -> &'static str {
        match self {
            ReplicationError::Link(_) => "link_error",
            ReplicationError::Transfer(_) => "transfer_error",
            ReplicationError::MalformedSnapshot { .. } => "malformed_snapshot",
            ReplicationError::Import(_) => "import_error",
            ReplicationError::Database(_) => "database_error",
            ReplicationError::Config(_) => "config_error",
        }
    }
}
