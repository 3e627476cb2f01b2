//! Port for the language model.
//!
//! Transport, authentication and retries live behind this seam.

use futures::Stream;
use std::pin::Pin;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::turn::domain::{MessageList, RawChunk, StreamOptions};

/// Lazy sequence of raw chunks produced by a model client.
pub type RawChunkStream = Pin<Box<dyn Stream<Item = Result<RawChunk, ModelClientError>> + Send>>;

/// Streams chat completions.
#[cfg_attr(test, mockall::automock)]
pub trait ModelClient: Send + Sync {
    /// Returns the identifier of the selected model, if any.
    fn selected_model(&self) -> Option<String>;

    /// Starts a streamed completion.
    ///
    /// The returned stream is lazy: nothing is requested until it is polled.
    /// It is not restartable. Implementations should stop producing once
    /// `cancel` fires; failures surface as `Err` items.
    fn stream_chat(
        &self,
        messages: MessageList,
        cancel: CancellationToken,
        options: StreamOptions,
    ) -> RawChunkStream;
}

/// Failures reported by a model client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelClientError {
    /// No model is selected.
    #[error("no chat model selected")]
    NoModelSelected,

    /// The transport failed.
    #[error("transport error: {0}")]
    Transport(String),
}
