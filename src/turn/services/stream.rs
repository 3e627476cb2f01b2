//! The streaming adapter: normalised, cancellable model output.

use futures::Stream;
use futures::stream::FusedStream;
use mockable::Clock;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

use super::in_flight::InFlightSlot;
use super::reporter::EventReporter;
use crate::turn::domain::{MessageList, NormalizedChunk, StreamOptions, TurnId, TurnState};
use crate::turn::error::TurnError;
use crate::turn::ports::model_client::RawChunkStream;
use crate::turn::ports::{ModelClient, TurnObserver};

/// Lazily yields normalised chunks of a model response.
///
/// Each call to `poll_next` first checks the cancellation token; once it has
/// fired the underlying stream is dropped, nothing more is requested and the
/// turn ends in [`TurnState::Cancelled`]. A transport failure is yielded once
/// as an `Err` item and ends the turn in [`TurnState::Failed`]; chunks
/// yielded before it stay valid. Exhaustion ends the turn in
/// [`TurnState::Complete`].
///
/// Dropping the stream before it finishes cancels the turn.
pub struct TurnStream<K>
where
    K: Clock + Send + Sync,
{
    inner: Option<RawChunkStream>,
    cancel: CancellationToken,
    cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
    reporter: EventReporter<K>,
    chunks: usize,
    slot: Option<InFlightSlot>,
}

impl<K> TurnStream<K>
where
    K: Clock + Send + Sync,
{
    pub(crate) fn from_parts(
        inner: RawChunkStream,
        cancel: CancellationToken,
        reporter: EventReporter<K>,
    ) -> Self {
        Self {
            inner: Some(inner),
            cancelled: Box::pin(cancel.clone().cancelled_owned()),
            cancel,
            reporter,
            chunks: 0,
            slot: None,
        }
    }

    /// Ties the stream to an orchestrator's in-flight slot, released once
    /// the turn ends.
    pub(crate) fn occupying(mut self, slot: InFlightSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// A turn that was cancelled before anything was streamed.
    pub(crate) fn cancelled(cancel: CancellationToken, reporter: EventReporter<K>) -> Self {
        let mut stream = Self {
            inner: None,
            cancelled: Box::pin(cancel.clone().cancelled_owned()),
            cancel,
            reporter,
            chunks: 0,
            slot: None,
        };
        stream.finish(TurnState::Cancelled);
        stream
    }

    /// Returns the turn identifier.
    #[must_use]
    pub const fn turn_id(&self) -> TurnId {
        self.reporter.turn_id()
    }

    /// Returns the current state of the turn.
    #[must_use]
    pub const fn state(&self) -> TurnState {
        self.reporter.state()
    }

    /// Returns the number of chunks yielded so far.
    #[must_use]
    pub const fn chunks_emitted(&self) -> usize {
        self.chunks
    }

    /// Raises the cancellation signal. Takes effect at the next poll.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    fn finish(&mut self, state: TurnState) {
        self.inner = None;
        self.reporter.finish(state, self.chunks);
        if let Some(slot) = self.slot.take() {
            slot.release(self.reporter.turn_id());
        }
    }
}

/// Starts streaming `messages` from `client`, outside of a full turn.
///
/// The returned stream starts in [`TurnState::Streaming`]; events are
/// reported to `observer` under a fresh turn identifier.
#[must_use]
pub fn stream<M, K>(
    client: &M,
    messages: MessageList,
    cancel: CancellationToken,
    options: StreamOptions,
    observer: Arc<dyn TurnObserver>,
    clock: Arc<K>,
) -> TurnStream<K>
where
    M: ModelClient + ?Sized,
    K: Clock + Send + Sync,
{
    let reporter = EventReporter::in_state(TurnId::new(), TurnState::Streaming, observer, clock);
    let inner = client.stream_chat(messages, cancel.clone(), options);
    TurnStream::from_parts(inner, cancel, reporter)
}

impl<K> Stream for TurnStream<K>
where
    K: Clock + Send + Sync,
{
    type Item = Result<NormalizedChunk, TurnError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.reporter.state().is_terminal() {
            return Poll::Ready(None);
        }
        if this.cancel.is_cancelled() || this.cancelled.as_mut().poll(cx).is_ready() {
            this.finish(TurnState::Cancelled);
            return Poll::Ready(None);
        }
        let Some(inner) = this.inner.as_mut() else {
            this.finish(TurnState::Complete);
            return Poll::Ready(None);
        };

        match inner.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(raw))) => {
                this.chunks += 1;
                Poll::Ready(Some(Ok(NormalizedChunk::from(raw))))
            }
            Poll::Ready(Some(Err(error))) => {
                this.finish(TurnState::Failed);
                Poll::Ready(Some(Err(TurnError::from(error))))
            }
            Poll::Ready(None) => {
                this.finish(TurnState::Complete);
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<K> FusedStream for TurnStream<K>
where
    K: Clock + Send + Sync,
{
    fn is_terminated(&self) -> bool {
        self.reporter.state().is_terminal()
    }
}

impl<K> Drop for TurnStream<K>
where
    K: Clock + Send + Sync,
{
    fn drop(&mut self) {
        if !self.reporter.state().is_terminal() {
            self.cancel.cancel();
            self.finish(TurnState::Cancelled);
        }
    }
}
