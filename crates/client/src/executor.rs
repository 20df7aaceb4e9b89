//! Batch execution
//!
//! [`BatchExecutor::execute`] turns a non-empty list of requests into a
//! [`ResponseStream`]. Guarantees:
//!
//! - An empty list fails synchronously with [`ClientError::EmptyBatch`],
//!   distinct from any per-item status.
//! - Items that fail validation are short-circuited locally into an
//!   `IllegalArgument` response echoing the request; they never reach the
//!   transport and never affect siblings.
//! - Every accepted item is dispatched on its own task; no batch-wide lock
//!   spans the network round trip, so one slow key cannot block another's
//!   delivery.
//! - Exactly one response per item, eventually. A per-item deadline
//!   (`response_timeout`) that elapses yields a `ResponseTimeout` response
//!   for that item. A transport error is pushed into the stream and
//!   terminates it.

use crate::stream::{ResponseStream, StreamItem};
use crate::transport::StoreTransport;
use crate::validator::validate;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use ttlkv_core::{
    ClientConfig, ClientError, OperationRequest, OperationResponse, OperationStatus,
};

/// Submits per-key operations concurrently and fans their outcomes into
/// one response stream.
pub struct BatchExecutor {
    transport: Arc<dyn StoreTransport>,
    config: ClientConfig,
}

impl BatchExecutor {
    /// Build an executor over `transport` with the given bounds.
    pub fn new(transport: Arc<dyn StoreTransport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Execute a batch. Responses arrive on the returned stream in
    /// arbitrary order; correlate by echoed key.
    pub fn execute(
        &self,
        requests: Vec<OperationRequest>,
    ) -> Result<ResponseStream, ClientError> {
        if requests.is_empty() {
            return Err(ClientError::EmptyBatch);
        }

        let expected = requests.len();
        // Capacity equals the batch size: the total number of sends is
        // bounded by the item count, so no sender ever blocks on a full
        // channel and local rejections can be pushed synchronously.
        let (tx, rx) = mpsc::channel::<StreamItem>(expected);

        for request in requests {
            match validate(&request, &self.config) {
                Err(err) => {
                    debug!(
                        op = %request.op,
                        reason = err.reason_code(),
                        "batch item rejected locally"
                    );
                    let resp = rejection_response(&request);
                    // Cannot fail: capacity covers every item.
                    let _ = tx.try_send(Ok(resp));
                }
                Ok(op) => {
                    let transport = Arc::clone(&self.transport);
                    let deadline = self.config.response_timeout();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let echo_key = op.key.clone();
                        let request_id = op.request_id;
                        let item = match tokio::time::timeout(deadline, transport.dispatch(op))
                            .await
                        {
                            Ok(Ok(resp)) => Ok(resp),
                            Ok(Err(err)) => {
                                debug!(%request_id, error = %err, "batch item transport failure");
                                Err(err)
                            }
                            Err(_) => {
                                debug!(%request_id, ?deadline, "batch item response deadline elapsed");
                                Ok(OperationResponse::empty(
                                    echo_key,
                                    OperationStatus::ResponseTimeout,
                                ))
                            }
                        };
                        // The receiver may be gone if the consumer stopped
                        // waiting; the outcome is then unobserved.
                        let _ = tx.send(item).await;
                    });
                }
            }
        }

        Ok(ResponseStream::new(rx, expected))
    }
}

/// Local `IllegalArgument` response for a rejected batch item, echoing the
/// request so the caller can correlate it by key.
fn rejection_response(request: &OperationRequest) -> OperationResponse {
    OperationResponse {
        key: request.key.clone(),
        value: request.value.clone(),
        version: request.version,
        ttl: request.ttl.unwrap_or(0),
        creation_time: request.creation_time,
        status: OperationStatus::IllegalArgument,
    }
}
