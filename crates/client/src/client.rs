//! Client surface
//!
//! Single-item operations and batch submission over one [`StoreTransport`].
//!
//! Entry-point policy (deliberate, one policy per entry point):
//!
//! - **Single-item** calls treat any validation failure as a whole-call
//!   error: the call *is* the item, so the error is synchronous and
//!   nothing is dispatched.
//! - **Batch** calls isolate every validation failure as a per-item
//!   `IllegalArgument` response so siblings can still succeed. Only an
//!   empty list fails the whole call.
//!
//! Store-reported business outcomes (`NoKey`, `ConditionViolation`,
//! `UniqueKeyViolation`) come back as `Ok(response)` with the status set;
//! transport failures come back as `Err`.

use crate::executor::BatchExecutor;
use crate::stream::ResponseStream;
use crate::transport::{StoreOp, StoreTransport};
use crate::validator::validate;
use std::sync::Arc;
use tracing::debug;
use ttlkv_core::{
    ClientConfig, ClientError, ClientResult, OperationRequest, OperationResponse, OperationType,
    RecordContext, TransportError,
};
use uuid::Uuid;

/// Client for a remote TTL-based, versioned key-value store.
pub struct Client {
    transport: Arc<dyn StoreTransport>,
    config: ClientConfig,
    executor: BatchExecutor,
}

impl Client {
    /// Build a client over `transport` with the given configuration.
    pub fn new(transport: Arc<dyn StoreTransport>, config: ClientConfig) -> Self {
        let executor = BatchExecutor::new(Arc::clone(&transport), config.clone());
        Self {
            transport,
            config,
            executor,
        }
    }

    /// The configuration this client enforces.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Insert a new record with the default lifetime.
    pub async fn create(&self, key: &[u8], value: &[u8]) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::create(key.to_vec(), value.to_vec(), None))
            .await
    }

    /// Insert a new record with an explicit lifetime.
    pub async fn create_with_ttl(
        &self,
        key: &[u8],
        value: &[u8],
        ttl: u32,
    ) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::create(
            key.to_vec(),
            value.to_vec(),
            Some(ttl),
        ))
        .await
    }

    /// Read a record without touching its remaining lifetime.
    pub async fn get(&self, key: &[u8]) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::get(key.to_vec(), None)).await
    }

    /// Read a record and reset its remaining lifetime to `ttl` seconds
    /// (sliding expiration).
    pub async fn get_with_ttl(&self, key: &[u8], ttl: u32) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::get(key.to_vec(), Some(ttl)))
            .await
    }

    /// Replace the value of an existing record.
    pub async fn update(&self, key: &[u8], value: &[u8]) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::update(key.to_vec(), value.to_vec(), None))
            .await
    }

    /// Replace the value of an existing record and reset its lifetime.
    pub async fn update_with_ttl(
        &self,
        key: &[u8],
        value: &[u8],
        ttl: u32,
    ) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::update(
            key.to_vec(),
            value.to_vec(),
            Some(ttl),
        ))
        .await
    }

    /// Insert or replace a record unconditionally.
    pub async fn set(&self, key: &[u8], value: &[u8]) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::set(key.to_vec(), value.to_vec(), None))
            .await
    }

    /// Insert or replace a record with an explicit lifetime.
    pub async fn set_with_ttl(
        &self,
        key: &[u8],
        value: &[u8],
        ttl: u32,
    ) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::set(
            key.to_vec(),
            value.to_vec(),
            Some(ttl),
        ))
        .await
    }

    /// Remove a record. Destroying an absent key still succeeds.
    pub async fn destroy(&self, key: &[u8]) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::destroy(key.to_vec())).await
    }

    /// Conditional update gated on the version captured in `context`.
    ///
    /// Succeeds only if the store's current version still matches; a stale
    /// version yields `ConditionViolation` without mutating value, version
    /// or lifetime.
    pub async fn compare_and_set(
        &self,
        context: &RecordContext,
        value: &[u8],
        ttl: Option<u32>,
    ) -> ClientResult<OperationResponse> {
        self.execute(OperationRequest::new(
            context.key().to_vec(),
            value.to_vec(),
            context.version(),
            ttl,
            OperationType::CompareAndSet,
        ))
        .await
    }

    /// Submit a batch of independent per-key operations.
    ///
    /// Consume the returned stream directly (blocking or reactive) or hand
    /// it to a [`BatchCollector`](crate::BatchCollector) for a bounded
    /// wait.
    pub fn do_batch(&self, requests: Vec<OperationRequest>) -> Result<ResponseStream, ClientError> {
        self.executor.execute(requests)
    }

    async fn execute(&self, request: OperationRequest) -> ClientResult<OperationResponse> {
        let op = validate(&request, &self.config)?;
        let response = self.dispatch(op.clone()).await?;

        if self.config.retry_enabled && response.status.is_retriable() {
            debug!(
                op = %request.op,
                status = %response.status,
                "retrying operation once after retriable status"
            );
            let retry = StoreOp {
                request_id: Uuid::new_v4(),
                ..op
            };
            return self.dispatch(retry).await;
        }
        Ok(response)
    }

    async fn dispatch(&self, op: StoreOp) -> ClientResult<OperationResponse> {
        let deadline = self.config.response_timeout();
        match tokio::time::timeout(deadline, self.transport.dispatch(op)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(ClientError::Transport(err)),
            Err(_) => Err(ClientError::Transport(TransportError::ResponseTimeout {
                elapsed: deadline,
            })),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("application", &self.config.application)
            .field("namespace", &self.config.record_namespace)
            .finish()
    }
}
