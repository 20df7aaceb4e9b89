//! Shared data model for the ttlkv client
//!
//! This crate defines the types exchanged between the caller, the validator,
//! the batch executor and the storage backend:
//!
//! - [`OperationRequest`] / [`OperationResponse`]: one unit of work against
//!   one key, and the store's per-key outcome
//! - [`OperationStatus`]: the frozen status taxonomy reported by the store
//! - [`RecordContext`]: the immutable handle used for conditional updates
//! - [`ClientConfig`]: the bounds and identities the validator enforces
//! - Error types: [`InputError`], [`TransportError`], [`ClientError`]
//!
//! No I/O happens here. Everything network-facing lives behind the
//! `StoreTransport` seam in `ttlkv-client`.

pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod status;

pub use config::ClientConfig;
pub use error::{ClientError, InputError, TransportError};
pub use request::{OperationRequest, OperationType};
pub use response::{OperationResponse, RecordContext};
pub use status::OperationStatus;

/// Result alias for client-facing operations.
pub type ClientResult<T> = Result<T, ClientError>;
