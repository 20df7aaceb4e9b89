//! Response stream
//!
//! [`ResponseStream`] is the single-subscription output of a batch
//! execution. Items arrive in delivery order, which has no relation to
//! submission order; correlate by echoed key.
//!
//! The first transport error is terminal: it is yielded once and the
//! stream ends, regardless of how many items are still in flight. Later
//! deliveries go unobserved. Clean exhaustion means every submitted item
//! produced its response.

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use ttlkv_core::{OperationResponse, TransportError};

pub(crate) type StreamItem = Result<OperationResponse, TransportError>;

/// Asynchronous, possibly-interleaved stream of per-key outcomes.
pub struct ResponseStream {
    rx: mpsc::Receiver<StreamItem>,
    expected: usize,
    terminated: bool,
}

impl ResponseStream {
    pub(crate) fn new(rx: mpsc::Receiver<StreamItem>, expected: usize) -> Self {
        Self {
            rx,
            expected,
            terminated: false,
        }
    }

    /// Number of responses a complete execution will deliver.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Receive the next outcome, or `None` once the stream has ended.
    pub async fn next_response(&mut self) -> Option<StreamItem> {
        if self.terminated {
            return None;
        }
        match self.rx.recv().await {
            Some(Err(err)) => {
                self.terminated = true;
                Some(Err(err))
            }
            Some(ok) => Some(ok),
            None => {
                self.terminated = true;
                None
            }
        }
    }

    /// Blocking consumption: suspend until the stream is exhausted and
    /// return every response, or the terminal transport error.
    pub async fn collect_all(mut self) -> Result<Vec<OperationResponse>, TransportError> {
        let mut responses = Vec::with_capacity(self.expected);
        while let Some(item) = self.next_response().await {
            responses.push(item?);
        }
        Ok(responses)
    }
}

impl Stream for ResponseStream {
    type Item = StreamItem;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.terminated {
            return Poll::Ready(None);
        }
        match this.rx.poll_recv(cx) {
            Poll::Ready(Some(Err(err))) => {
                this.terminated = true;
                Poll::Ready(Some(Err(err)))
            }
            Poll::Ready(Some(ok)) => Poll::Ready(Some(ok)),
            Poll::Ready(None) => {
                this.terminated = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl std::fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream")
            .field("expected", &self.expected)
            .field("terminated", &self.terminated)
            .finish()
    }
}
