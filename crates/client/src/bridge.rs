//! Result-aggregation bridge
//!
//! Converts the push-based response stream into a bounded, pull-based wait.
//! A background drain task appends responses into a shared collection and
//! flips the terminal flag; [`BatchCollector::await_result`] blocks the
//! consumer with a timeout budget.
//!
//! ## States
//!
//! ```text
//! Pending -> Receiving -> Completed
//!                      \-> Failed
//! ```
//!
//! There is no Cancelled state: a consumer that stops waiting abandons only
//! its wait. The drain task keeps collecting; later deliveries land in the
//! collector unobserved.
//!
//! ## Timeout semantics
//!
//! Budget exhaustion with neither terminal flag set returns the responses
//! accumulated so far as [`BatchOutcome::Partial`] — a value, not an error.
//! Callers distinguish "timed out with partial data" from "upstream failed"
//! by type: the latter re-raises the recorded first error.
//!
//! The wait is deadline-aware (notify + `sleep_until`) rather than a
//! fixed-interval poll, with identical completion/timeout/partial-result
//! semantics. The bridge never retries; retry belongs beneath it.

use crate::stream::ResponseStream;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, warn};
use ttlkv_core::{OperationResponse, TransportError};

/// Lifecycle of one aggregated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Attached, nothing received yet.
    Pending,
    /// At least one response received.
    Receiving,
    /// Stream exhausted cleanly; every item answered.
    Completed,
    /// Stream terminated by a transport error.
    Failed,
}

const STATE_PENDING: u8 = 0;
const STATE_RECEIVING: u8 = 1;
const STATE_COMPLETED: u8 = 2;
const STATE_FAILED: u8 = 3;

/// Callback listener observing the drain as it happens.
///
/// All hooks run on the drain task. Default implementations do nothing, so
/// listeners override only what they watch.
pub trait BatchObserver: Send + Sync {
    /// One response was delivered.
    fn on_next(&self, _resp: &OperationResponse) {}
    /// The stream terminated with a transport error.
    fn on_error(&self, _err: &TransportError) {}
    /// The stream was exhausted cleanly.
    fn on_completed(&self) {}
}

/// Aggregate outcome of a bounded wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The stream completed; every item's response is present.
    Complete(Vec<OperationResponse>),
    /// The budget elapsed first; a strict subset accumulated so far.
    Partial(Vec<OperationResponse>),
}

impl BatchOutcome {
    /// Whether the budget elapsed before completion.
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }

    /// The accumulated responses.
    pub fn responses(&self) -> &[OperationResponse] {
        match self {
            Self::Complete(r) | Self::Partial(r) => r,
        }
    }

    /// Consume the outcome, keeping the responses.
    pub fn into_responses(self) -> Vec<OperationResponse> {
        match self {
            Self::Complete(r) | Self::Partial(r) => r,
        }
    }
}

struct Shared {
    /// Synchronized response collection, many-writer/one-reader.
    responses: Mutex<Vec<OperationResponse>>,
    /// Count of received responses.
    received: AtomicUsize,
    state: AtomicU8,
    /// Single-slot terminal error; first error wins.
    error: Mutex<Option<TransportError>>,
    /// Woken on terminal transitions only.
    terminal: Notify,
}

impl Shared {
    fn state(&self) -> BatchState {
        match self.state.load(Ordering::Acquire) {
            STATE_PENDING => BatchState::Pending,
            STATE_RECEIVING => BatchState::Receiving,
            STATE_COMPLETED => BatchState::Completed,
            _ => BatchState::Failed,
        }
    }

    fn on_next(&self, resp: OperationResponse) {
        self.received.fetch_add(1, Ordering::AcqRel);
        // Pending -> Receiving on first delivery; terminal states never
        // regress because the drain task is the only writer after them.
        let _ = self.state.compare_exchange(
            STATE_PENDING,
            STATE_RECEIVING,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        self.responses.lock().push(resp);
    }

    fn on_error(&self, err: TransportError) {
        {
            let mut slot = self.error.lock();
            if slot.is_none() {
                *slot = Some(err);
            }
        }
        self.state.store(STATE_FAILED, Ordering::Release);
        self.terminal.notify_waiters();
    }

    fn on_completed(&self) {
        self.state.store(STATE_COMPLETED, Ordering::Release);
        self.terminal.notify_waiters();
    }
}

/// Push-to-pull bridge over one batch execution.
///
/// Cloneable handle; all clones observe the same collection and flags.
#[derive(Clone)]
pub struct BatchCollector {
    shared: Arc<Shared>,
    expected: usize,
}

impl BatchCollector {
    /// Attach to a stream, spawning the drain task.
    pub fn attach(stream: ResponseStream) -> Self {
        Self::attach_with(stream, None)
    }

    /// Attach with a callback listener observing the drain.
    pub fn attach_with(
        mut stream: ResponseStream,
        observer: Option<Arc<dyn BatchObserver>>,
    ) -> Self {
        let expected = stream.expected();
        let shared = Arc::new(Shared {
            responses: Mutex::new(Vec::with_capacity(expected)),
            received: AtomicUsize::new(0),
            state: AtomicU8::new(STATE_PENDING),
            error: Mutex::new(None),
            terminal: Notify::new(),
        });

        let drain = Arc::clone(&shared);
        tokio::spawn(async move {
            while let Some(item) = stream.next_response().await {
                match item {
                    Ok(resp) => {
                        if let Some(obs) = observer.as_deref() {
                            obs.on_next(&resp);
                        }
                        drain.on_next(resp);
                    }
                    Err(err) => {
                        warn!(error = %err, "batch stream failed");
                        if let Some(obs) = observer.as_deref() {
                            obs.on_error(&err);
                        }
                        drain.on_error(err);
                        return;
                    }
                }
            }
            debug!(
                received = drain.received.load(Ordering::Acquire),
                "batch stream completed"
            );
            if let Some(obs) = observer.as_deref() {
                obs.on_completed();
            }
            drain.on_completed();
        });

        Self { shared, expected }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BatchState {
        self.shared.state()
    }

    /// Whether the stream was exhausted cleanly.
    pub fn is_completed(&self) -> bool {
        self.state() == BatchState::Completed
    }

    /// Number of responses received so far.
    pub fn received(&self) -> usize {
        self.shared.received.load(Ordering::Acquire)
    }

    /// Number of responses a complete execution will deliver.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Snapshot of the responses accumulated so far.
    pub fn responses(&self) -> Vec<OperationResponse> {
        self.shared.responses.lock().clone()
    }

    /// Wait for the batch to finish, bounded by `budget`.
    ///
    /// - Completed: `Ok(BatchOutcome::Complete)` with every response.
    /// - Failed: `Err` re-raising the recorded first error.
    /// - Budget elapsed with neither flag set: `Ok(BatchOutcome::Partial)`
    ///   with whatever accumulated — a partial result, not an error.
    pub async fn await_result(&self, budget: Duration) -> Result<BatchOutcome, TransportError> {
        let deadline = tokio::time::Instant::now() + budget;
        loop {
            // Register for the terminal notification before checking state,
            // otherwise a transition between check and sleep is lost.
            let notified = self.shared.terminal.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            match self.shared.state() {
                BatchState::Completed => {
                    return Ok(BatchOutcome::Complete(self.responses()));
                }
                BatchState::Failed => {
                    let err = self
                        .shared
                        .error
                        .lock()
                        .clone()
                        .unwrap_or(TransportError::Closed);
                    return Err(err);
                }
                BatchState::Pending | BatchState::Receiving => {}
            }

            tokio::select! {
                _ = &mut notified => {}
                _ = tokio::time::sleep_until(deadline) => {
                    debug!(
                        received = self.received(),
                        expected = self.expected,
                        "batch wait budget elapsed, returning partial result"
                    );
                    return Ok(BatchOutcome::Partial(self.responses()));
                }
            }
        }
    }
}

impl std::fmt::Debug for BatchCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCollector")
            .field("state", &self.state())
            .field("received", &self.received())
            .field("expected", &self.expected)
            .finish()
    }
}
