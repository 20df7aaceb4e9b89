//! Transport seam to the storage backend
//!
//! Everything network-facing sits behind [`StoreTransport`]: wire protocol,
//! TLS, connection pooling and recycling are implementation details of the
//! transport and out of scope here. The contract is narrow: one validated
//! operation in, one response or one transport error out.
//!
//! Business outcomes (`NoKey`, `ConditionViolation`, `UniqueKeyViolation`)
//! are responses, never `Err`. A transport error means the outcome is
//! unknown.

use async_trait::async_trait;
use ttlkv_core::{OperationResponse, OperationType, TransportError};
use uuid::Uuid;

/// A validated, wire-ready operation.
///
/// Produced by the validator; carries the resolved scope and effective TTL
/// so the transport never consults client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOp {
    /// Correlation id, unique per dispatched operation.
    pub request_id: Uuid,
    /// Operation kind.
    pub op: OperationType,
    /// Record namespace of the issuing client.
    pub namespace: String,
    /// Application identity of the issuing client.
    pub application: String,
    /// Record key.
    pub key: Vec<u8>,
    /// Payload; empty for Get/Destroy.
    pub value: Vec<u8>,
    /// Version gate for conditional updates; 0 otherwise.
    pub version: u64,
    /// Effective lifetime in seconds. 0 means "don't change".
    pub ttl_secs: u32,
    /// Advisory creation timestamp in milliseconds.
    pub creation_time: u64,
}

/// Asynchronous channel to the remote store.
///
/// Implementations must be safe to share across tasks; the batch executor
/// dispatches every accepted item concurrently through one instance.
#[async_trait]
pub trait StoreTransport: Send + Sync {
    /// Execute one operation against the store.
    async fn dispatch(&self, op: StoreOp) -> Result<OperationResponse, TransportError>;
}
