//! Client-issued operation requests
//!
//! An [`OperationRequest`] is one unit of work against one key. Requests are
//! built, validated, dispatched and then discarded; the store answers each
//! with exactly one [`OperationResponse`](crate::OperationResponse).

use serde::{Deserialize, Serialize};

/// The kind of per-key operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// Insert a new record; fails with `UniqueKeyViolation` if one exists.
    Create,
    /// Read a record; an explicit TTL resets the remaining lifetime.
    Get,
    /// Replace the value of an existing record; `NoKey` if absent.
    Update,
    /// Insert or replace unconditionally.
    Set,
    /// Remove a record; succeeds whether or not the record exists.
    Destroy,
    /// Conditional update gated on the record's current version.
    ///
    /// Not constructible through the batch request surface; produced by the
    /// client's `compare_and_set` entry point.
    CompareAndSet,
}

impl OperationType {
    /// Short operation mnemonic used in logs.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Get => "GET",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Destroy => "DESTROY",
            Self::CompareAndSet => "CAS",
        }
    }

    /// Whether this operation carries a payload to the store.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get | Self::Destroy)
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// One client-issued unit of work against one key.
///
/// `ttl` is in seconds; `None` (or 0) means "use the configured default" for
/// Create and "don't change the remaining lifetime" for everything else.
/// `version` is consulted only by [`OperationType::CompareAndSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    /// Record key, 1..=128 bytes after validation.
    pub key: Vec<u8>,
    /// Payload, up to 204800 bytes; unused for Get/Destroy.
    pub value: Vec<u8>,
    /// Known record version; only meaningful for conditional updates.
    pub version: u64,
    /// Requested time-to-live in seconds.
    pub ttl: Option<u32>,
    /// Advisory creation timestamp in milliseconds.
    pub creation_time: u64,
    /// Operation kind.
    pub op: OperationType,
}

impl OperationRequest {
    /// Build a request from all parts.
    pub fn new(
        key: Vec<u8>,
        value: Vec<u8>,
        version: u64,
        ttl: Option<u32>,
        op: OperationType,
    ) -> Self {
        Self {
            key,
            value,
            version,
            ttl,
            creation_time: 0,
            op,
        }
    }

    /// Create request for `key` holding `value`.
    pub fn create(key: Vec<u8>, value: Vec<u8>, ttl: Option<u32>) -> Self {
        Self::new(key, value, 0, ttl, OperationType::Create)
    }

    /// Get request for `key`; a `Some(ttl)` with `ttl > 0` slides expiration.
    pub fn get(key: Vec<u8>, ttl: Option<u32>) -> Self {
        Self::new(key, Vec::new(), 0, ttl, OperationType::Get)
    }

    /// Update request replacing the value of an existing record.
    pub fn update(key: Vec<u8>, value: Vec<u8>, ttl: Option<u32>) -> Self {
        Self::new(key, value, 0, ttl, OperationType::Update)
    }

    /// Set request inserting or replacing unconditionally.
    pub fn set(key: Vec<u8>, value: Vec<u8>, ttl: Option<u32>) -> Self {
        Self::new(key, value, 0, ttl, OperationType::Set)
    }

    /// Destroy request for `key`.
    pub fn destroy(key: Vec<u8>) -> Self {
        Self::new(key, Vec::new(), 0, None, OperationType::Destroy)
    }

    /// Set the advisory creation timestamp (milliseconds).
    pub fn with_creation_time(mut self, millis: u64) -> Self {
        self.creation_time = millis;
        self
    }
}
