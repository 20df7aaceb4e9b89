//! # ttlkv
//!
//! Client for a remote, TTL-based, versioned key-value store.
//!
//! Records carry a per-key version (1 on create, +1 per successful
//! mutation) and a lifetime in seconds. A batch of independent per-key
//! operations resolves independently: one invalid item becomes an
//! `IllegalArgument` response for that item alone.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ttlkv::prelude::*;
//!
//! let client = Client::new(transport, ClientConfig::new("my-app", "sessions"));
//!
//! // Single-item operations
//! let created = client.create(b"user:1", b"alice").await?;
//! let read = client.get(b"user:1").await?;
//! assert_eq!(read.version, 1);
//!
//! // Conditional update via the record context
//! client.compare_and_set(&read.record_context(), b"alice2", None).await?;
//!
//! // Batch with a bounded wait
//! let stream = client.do_batch(requests)?;
//! let collector = BatchCollector::attach(stream);
//! let outcome = collector.await_result(Duration::from_secs(10)).await?;
//! ```
//!
//! ## Consumption modes
//!
//! One execution core, three ways to consume it:
//!
//! 1. **Blocking** — [`ResponseStream::collect_all`]
//! 2. **Bridge/polling** — [`BatchCollector::await_result`], the only mode
//!    returning partial results on timeout
//! 3. **Reactive** — [`ResponseStream`] as a `futures::Stream`

#![warn(missing_docs)]

pub mod prelude;

pub use ttlkv_client::{
    validate, BatchCollector, BatchExecutor, BatchObserver, BatchOutcome, BatchState, Client,
    ResponseStream, StoreOp, StoreTransport,
};
pub use ttlkv_core::{
    ClientConfig, ClientError, ClientResult, InputError, OperationRequest, OperationResponse,
    OperationStatus, OperationType, RecordContext, TransportError,
};
