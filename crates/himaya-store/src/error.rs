use std::fmt;

use thiserror::Error;

/// Errors from a single storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store initialization failed: {0}")]
    Initialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Identifies which side of the dual store an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replica {
    KeyValue,
    Relational,
}

impl fmt::Display for Replica {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replica::KeyValue => write!(f, "key-value"),
            Replica::Relational => write!(f, "relational"),
        }
    }
}

/// Errors surfaced by the facade. A failed replica is named so a retry can
/// target just that side instead of re-running the full dual write.
#[derive(Debug, Error)]
pub enum DualStoreError {
    #[error("{replica} replica failed: {source}")]
    Replica {
        replica: Replica,
        source: StoreError,
    },

    #[error("both replicas failed: key-value: {kv}; relational: {sql}")]
    Both { kv: StoreError, sql: StoreError },
}

impl DualStoreError {
    /// The replicas this error implicates.
    pub fn failed_replicas(&self) -> Vec<Replica> {
        match self {
            DualStoreError::Replica { replica, .. } => vec![*replica],
            DualStoreError::Both { .. } => vec![Replica::KeyValue, Replica::Relational],
        }
    }
}
