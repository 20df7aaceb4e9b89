//! Batch execution and result aggregation for the ttlkv client
//!
//! This crate turns a list of independent per-key operations into a stream
//! of per-key outcomes, and offers three ways to consume that stream:
//!
//! 1. **Blocking** — [`ResponseStream::collect_all`] suspends until the
//!    stream is exhausted.
//! 2. **Bridge/polling** — [`BatchCollector`] drains the stream on a
//!    background task and exposes a bounded wait with a timeout budget;
//!    the only mode that yields partial results on timeout.
//! 3. **Reactive** — [`ResponseStream`] implements `futures::Stream` for a
//!    single subscriber with one terminal wait.
//!
//! ## Flow
//!
//! ```text
//! caller -> validator (per item) -> BatchExecutor -> StoreTransport
//!        -> response stream -> BatchCollector -> keyed responses
//! ```
//!
//! Validation is local and pure; rejected items never reach the transport.
//! In batch mode a rejection becomes an `IllegalArgument` response for that
//! item alone, so siblings can still succeed.

pub mod bridge;
pub mod client;
pub mod executor;
pub mod stream;
pub mod transport;
pub mod validator;

pub use bridge::{BatchCollector, BatchObserver, BatchOutcome, BatchState};
pub use client::Client;
pub use executor::BatchExecutor;
pub use stream::ResponseStream;
pub use transport::{StoreOp, StoreTransport};
pub use validator::validate;

pub use ttlkv_core::{
    ClientConfig, ClientError, ClientResult, InputError, OperationRequest, OperationResponse,
    OperationStatus, OperationType, RecordContext, TransportError,
};
