//! Error types
//!
//! Three layers, matching how failures surface to the caller:
//!
//! - [`InputError`]: pure validation failures. Whole-call errors for
//!   single-item entry points; item-level `IllegalArgument` responses in
//!   batch mode.
//! - [`TransportError`]: failures of the channel to the store. Business
//!   outcomes (`NoKey`, `ConditionViolation`, ...) are never transport
//!   errors; they are normal responses.
//! - [`ClientError`]: the union surfaced by client entry points, plus the
//!   whole-call batch precondition.
//!
//! The `reason code` strings on [`InputError`] are part of the API contract
//! and must not change.

use std::time::Duration;
use thiserror::Error;

/// A request failed client-side validation. No I/O was performed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Key is empty.
    #[error("null_or_empty_key: the record key must not be empty")]
    EmptyKey,

    /// Key exceeds the configured maximum length.
    #[error("key_size_exceeded: key is {size} bytes, max is {max}")]
    KeySizeExceeded {
        /// Offending key length.
        size: usize,
        /// Configured bound.
        max: usize,
    },

    /// Payload exceeds the configured maximum length.
    #[error("payload_size_exceeded: payload is {size} bytes, max is {max}")]
    PayloadSizeExceeded {
        /// Offending payload length.
        size: usize,
        /// Configured bound.
        max: usize,
    },

    /// Requested lifetime exceeds the configured maximum.
    #[error("ttl_exceeded_max: requested {ttl}s, max is {max}s")]
    TtlExceedsMax {
        /// Effective requested lifetime.
        ttl: u32,
        /// Configured bound.
        max: u32,
    },

    /// Create resolved to a zero lifetime.
    #[error("invalid_ttl: a create must carry a non-zero lifetime")]
    ZeroTtl,

    /// Conditional update carries a version below 1.
    #[error("invalid_version: version {version} is below 1")]
    InvalidVersion {
        /// Offending version.
        version: u64,
    },
}

impl InputError {
    /// Stable reason code, the first token of the display output.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::EmptyKey => "null_or_empty_key",
            Self::KeySizeExceeded { .. } => "key_size_exceeded",
            Self::PayloadSizeExceeded { .. } => "payload_size_exceeded",
            Self::TtlExceedsMax { .. } => "ttl_exceeded_max",
            Self::ZeroTtl => "invalid_ttl",
            Self::InvalidVersion { .. } => "invalid_version",
        }
    }
}

/// The channel to the store failed.
///
/// A transport error halts delivery for the affected item (single call) or
/// terminates the response stream (batch). It never silently truncates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection-level failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// No response within the per-call deadline.
    #[error("response timed out after {elapsed:?}")]
    ResponseTimeout {
        /// The deadline that elapsed.
        elapsed: Duration,
    },

    /// Outbound queue is full; the request was never sent.
    #[error("outbound queue full")]
    QueueFull,

    /// The transport was shut down.
    #[error("transport closed")]
    Closed,
}

/// Union error surfaced by client entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Whole-call validation failure on a single-item entry point.
    #[error(transparent)]
    Input(#[from] InputError),

    /// `do_batch` was given an empty request list.
    ///
    /// Always a whole-call precondition failure, never a zero-length
    /// success, and distinct from any per-item status.
    #[error("batch request list must not be empty")]
    EmptyBatch,

    /// The transport failed before a response was produced.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
