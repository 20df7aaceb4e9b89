//! Client configuration
//!
//! Bounds and identities consumed by the validator and the executor. How
//! the values are loaded (files, environment) is out of scope; the struct
//! is the input.
//!
//! A record is scoped by `(record_namespace, application)`: identical key
//! bytes under different scopes are independent records with independent
//! versions.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum key length in bytes.
pub const MAX_KEY_SIZE: usize = 128;
/// Maximum payload length in bytes.
pub const MAX_PAYLOAD_SIZE: usize = 204_800;
/// Maximum record lifetime in seconds (3 days).
pub const MAX_TTL_SECS: u32 = 259_200;
/// Default record lifetime in seconds.
pub const DEFAULT_TTL_SECS: u32 = 1_800;
/// Default per-call response deadline.
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 200;

/// Bounds, identities and deadlines for one client instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Application identity stamped on every dispatched operation.
    pub application: String,
    /// Record namespace; part of the record scope.
    pub record_namespace: String,
    /// Lifetime applied when a create does not specify one, in seconds.
    pub default_ttl_secs: u32,
    /// Upper bound on any requested lifetime, in seconds.
    pub max_ttl_secs: u32,
    /// Upper bound on key length, in bytes.
    pub max_key_size: usize,
    /// Upper bound on payload length, in bytes.
    pub max_payload_size: usize,
    /// Per-call response deadline, in milliseconds.
    pub response_timeout_ms: u64,
    /// Retry a single operation once when the store reports a retriable
    /// status. Batch items are never retried.
    pub retry_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            application: String::new(),
            record_namespace: String::new(),
            default_ttl_secs: DEFAULT_TTL_SECS,
            max_ttl_secs: MAX_TTL_SECS,
            max_key_size: MAX_KEY_SIZE,
            max_payload_size: MAX_PAYLOAD_SIZE,
            response_timeout_ms: DEFAULT_RESPONSE_TIMEOUT_MS,
            retry_enabled: false,
        }
    }
}

impl ClientConfig {
    /// Config for `application` operating in `record_namespace`.
    pub fn new(application: impl Into<String>, record_namespace: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            record_namespace: record_namespace.into(),
            ..Self::default()
        }
    }

    /// Override the default record lifetime.
    pub fn with_default_ttl(mut self, secs: u32) -> Self {
        self.default_ttl_secs = secs;
        self
    }

    /// Override the per-call response deadline.
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Enable the single client-level retry for retriable statuses.
    pub fn with_retry(mut self, enabled: bool) -> Self {
        self.retry_enabled = enabled;
        self
    }

    /// The per-call response deadline as a [`Duration`].
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}
