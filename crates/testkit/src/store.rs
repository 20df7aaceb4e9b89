//! In-memory storage backend
//!
//! Implements the client-observable store contract:
//!
//! - Records are scoped by `(namespace, application, key)`; identical key
//!   bytes under different scopes are independent records.
//! - `version` starts at 1 on create, +1 per successful mutation, reset
//!   only by a fresh create after destroy.
//! - A plain get never touches the remaining lifetime; a get with an
//!   explicit TTL resets it (sliding expiration).
//! - Conditional updates succeed only when the supplied version matches;
//!   a mismatch mutates nothing.
//! - Destroy is idempotent: removing an absent record still succeeds.
//!
//! Expired records are treated as absent on access. Time is
//! `tokio::time::Instant`, so paused-clock tests control expiry exactly.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::Instant;
use tracing::trace;
use ttlkv_client::{StoreOp, StoreTransport};
use ttlkv_core::{OperationResponse, OperationStatus, OperationType, TransportError};

#[derive(Debug, Clone)]
struct Record {
    value: Vec<u8>,
    version: u64,
    creation_time: u64,
    expires_at: Instant,
}

impl Record {
    fn remaining_ttl(&self, now: Instant) -> u32 {
        self.expires_at.saturating_duration_since(now).as_secs() as u32
    }
}

type ScopedKey = (String, String, Vec<u8>);

/// In-memory store standing in for the remote backend.
///
/// Shared across tasks behind an `Arc`; every dispatched operation runs
/// its record mutation under one short-lived lock, after any injected
/// latency has elapsed.
pub struct InMemoryStore {
    records: Mutex<HashMap<ScopedKey, Record>>,
    default_ttl_secs: u32,
    base_latency: Mutex<Option<Duration>>,
    key_latency: Mutex<HashMap<Vec<u8>, Duration>>,
    key_failures: Mutex<HashMap<Vec<u8>, TransportError>>,
}

impl InMemoryStore {
    /// Store with the standard default lifetime (1800s).
    pub fn new() -> Self {
        Self::with_default_ttl(ttlkv_core::config::DEFAULT_TTL_SECS)
    }

    /// Store applying `secs` when an insert arrives without a lifetime.
    pub fn with_default_ttl(secs: u32) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            default_ttl_secs: secs,
            base_latency: Mutex::new(None),
            key_latency: Mutex::new(HashMap::new()),
            key_failures: Mutex::new(HashMap::new()),
        }
    }

    /// Delay every dispatch by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.base_latency.lock() = Some(latency);
    }

    /// Delay dispatches for one key, overriding the store-wide latency.
    pub fn set_key_latency(&self, key: &[u8], latency: Duration) {
        self.key_latency.lock().insert(key.to_vec(), latency);
    }

    /// Fail every dispatch for one key with `error`.
    pub fn fail_key(&self, key: &[u8], error: TransportError) {
        self.key_failures.lock().insert(key.to_vec(), error);
    }

    /// Number of live (unexpired) records across all scopes.
    pub fn live_records(&self) -> usize {
        let now = Instant::now();
        self.records
            .lock()
            .values()
            .filter(|r| r.expires_at > now)
            .count()
    }

    fn apply(&self, op: StoreOp) -> OperationResponse {
        let now = Instant::now();
        let scoped = (op.namespace.clone(), op.application.clone(), op.key.clone());
        let mut records = self.records.lock();

        // Expired records are absent; drop them on access.
        if records
            .get(&scoped)
            .is_some_and(|r| r.expires_at <= now)
        {
            records.remove(&scoped);
        }

        trace!(op = %op.op, key_len = op.key.len(), "store applying operation");
        match op.op {
            OperationType::Create => match records.get(&scoped) {
                Some(_) => OperationResponse::empty(op.key, OperationStatus::UniqueKeyViolation),
                None => {
                    let record = Record {
                        value: op.value,
                        version: 1,
                        creation_time: wall_clock_millis(),
                        expires_at: now + Duration::from_secs(u64::from(op.ttl_secs)),
                    };
                    let resp = created_response(&op.key, &record, now);
                    records.insert(scoped, record);
                    resp
                }
            },
            OperationType::Get => match records.get_mut(&scoped) {
                None => OperationResponse::empty(op.key, OperationStatus::NoKey),
                Some(record) => {
                    if op.ttl_secs > 0 {
                        // Sliding expiration: reset remaining lifetime.
                        record.expires_at = now + Duration::from_secs(u64::from(op.ttl_secs));
                    }
                    OperationResponse {
                        key: op.key,
                        value: record.value.clone(),
                        version: record.version,
                        ttl: record.remaining_ttl(now),
                        creation_time: record.creation_time,
                        status: OperationStatus::Success,
                    }
                }
            },
            OperationType::Update => match records.get_mut(&scoped) {
                None => OperationResponse::empty(op.key, OperationStatus::NoKey),
                Some(record) => {
                    record.value = op.value;
                    record.version += 1;
                    if op.ttl_secs > 0 {
                        record.expires_at = now + Duration::from_secs(u64::from(op.ttl_secs));
                    }
                    mutated_response(&op.key, record, now)
                }
            },
            OperationType::Set => match records.get_mut(&scoped) {
                Some(record) => {
                    record.value = op.value;
                    record.version += 1;
                    if op.ttl_secs > 0 {
                        record.expires_at = now + Duration::from_secs(u64::from(op.ttl_secs));
                    }
                    mutated_response(&op.key, record, now)
                }
                None => {
                    let ttl = if op.ttl_secs > 0 {
                        op.ttl_secs
                    } else {
                        self.default_ttl_secs
                    };
                    let record = Record {
                        value: op.value,
                        version: 1,
                        creation_time: wall_clock_millis(),
                        expires_at: now + Duration::from_secs(u64::from(ttl)),
                    };
                    let resp = created_response(&op.key, &record, now);
                    records.insert(scoped, record);
                    resp
                }
            },
            OperationType::Destroy => {
                records.remove(&scoped);
                OperationResponse::empty(op.key, OperationStatus::Success)
            }
            OperationType::CompareAndSet => match records.get_mut(&scoped) {
                None => OperationResponse::empty(op.key, OperationStatus::NoKey),
                Some(record) => {
                    if record.version != op.version {
                        // Condition violated: nothing mutates, the current
                        // version is echoed for diagnosis.
                        let mut resp =
                            OperationResponse::empty(op.key, OperationStatus::ConditionViolation);
                        resp.version = record.version;
                        resp
                    } else {
                        record.value = op.value;
                        record.version += 1;
                        if op.ttl_secs > 0 {
                            record.expires_at = now + Duration::from_secs(u64::from(op.ttl_secs));
                        }
                        mutated_response(&op.key, record, now)
                    }
                }
            },
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreTransport for InMemoryStore {
    async fn dispatch(&self, op: StoreOp) -> Result<OperationResponse, TransportError> {
        if let Some(err) = self.key_failures.lock().get(&op.key).cloned() {
            return Err(err);
        }

        let delay = {
            let per_key = self.key_latency.lock().get(&op.key).copied();
            per_key.or(*self.base_latency.lock())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(self.apply(op))
    }
}

fn created_response(key: &[u8], record: &Record, now: Instant) -> OperationResponse {
    mutated_response(key, record, now)
}

fn mutated_response(key: &[u8], record: &Record, now: Instant) -> OperationResponse {
    OperationResponse {
        key: key.to_vec(),
        value: record.value.clone(),
        version: record.version,
        ttl: record.remaining_ttl(now),
        creation_time: record.creation_time,
        status: OperationStatus::Success,
    }
}

fn wall_clock_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
