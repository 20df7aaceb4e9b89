//! Store-produced operation responses
//!
//! Each dispatched request yields exactly one [`OperationResponse`],
//! immutable once produced. The echoed `key` is the correlation handle:
//! batch responses arrive in arbitrary order and must be matched by key,
//! never by position.

use crate::status::OperationStatus;

/// The store's outcome for one per-key operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResponse {
    /// Echo of the request key.
    pub key: Vec<u8>,
    /// Record value; empty for misses and destroys.
    pub value: Vec<u8>,
    /// Per-key version: 1 on create, +1 per successful mutation.
    pub version: u64,
    /// Server-computed remaining lifetime in seconds.
    pub ttl: u32,
    /// Record creation timestamp in milliseconds.
    pub creation_time: u64,
    /// Outcome status.
    pub status: OperationStatus,
}

impl OperationResponse {
    /// Build a response echoing `key` with the given status and no record
    /// data. Used for misses and locally produced outcomes.
    pub fn empty(key: Vec<u8>, status: OperationStatus) -> Self {
        Self {
            key,
            value: Vec::new(),
            version: 0,
            ttl: 0,
            creation_time: 0,
            status,
        }
    }

    /// Whether the outcome is a plain success.
    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }

    /// The record metadata handle for a later conditional update.
    pub fn record_context(&self) -> RecordContext {
        RecordContext {
            key: self.key.clone(),
            version: self.version,
            creation_time: self.creation_time,
            ttl: self.ttl,
        }
    }
}

/// Immutable record metadata extracted from a response.
///
/// Correlates a read with a later conditional update: feed the context from
/// a `get` back into `compare_and_set` and the mutation succeeds only if no
/// other writer bumped the version in between (optimistic locking).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordContext {
    key: Vec<u8>,
    version: u64,
    creation_time: u64,
    ttl: u32,
}

impl RecordContext {
    /// Construct a context from raw parts.
    pub fn new(key: Vec<u8>, version: u64, creation_time: u64, ttl: u32) -> Self {
        Self {
            key,
            version,
            creation_time,
            ttl,
        }
    }

    /// The record key.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The version observed when this context was captured.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Record creation timestamp in milliseconds.
    pub fn creation_time(&self) -> u64 {
        self.creation_time
    }

    /// Remaining lifetime observed when this context was captured.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }
}
