//! Convenient imports for ttlkv.
//!
//! Re-exports the types most callers need:
//!
//! ```ignore
//! use ttlkv::prelude::*;
//!
//! let client = Client::new(transport, ClientConfig::new("app", "ns"));
//! ```

// Entry points
pub use crate::{BatchCollector, BatchExecutor, Client};

// Data model
pub use crate::{
    OperationRequest, OperationResponse, OperationStatus, OperationType, RecordContext,
};

// Configuration and errors
pub use crate::{ClientConfig, ClientError, ClientResult, InputError, TransportError};

// Batch consumption
pub use crate::{BatchObserver, BatchOutcome, BatchState, ResponseStream};

// Transport seam
pub use crate::{StoreOp, StoreTransport};
