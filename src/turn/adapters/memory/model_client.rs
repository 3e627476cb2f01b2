//! Model client that replays a fixed script.

use futures::StreamExt;
use futures::stream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;

use crate::turn::domain::{MessageList, RawChunk, StreamOptions};
use crate::turn::ports::model_client::{ModelClient, ModelClientError, RawChunkStream};

/// One recorded `stream_chat` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// The messages sent.
    pub messages: MessageList,
    /// The options sent.
    pub options: StreamOptions,
}

/// Replays scripted chunks and failures for every request.
///
/// Clones share the call log and the pull counter.
#[derive(Debug, Clone)]
pub struct ScriptedModelClient {
    model: Option<String>,
    script: Vec<Result<RawChunk, ModelClientError>>,
    pending_after_script: bool,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    pulled: Arc<AtomicUsize>,
}

impl ScriptedModelClient {
    /// Creates a client with `model` selected and an empty script.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::without_model()
        }
    }

    /// Creates a client with no model selected.
    #[must_use]
    pub fn without_model() -> Self {
        Self {
            model: None,
            script: Vec::new(),
            pending_after_script: false,
            calls: Arc::default(),
            pulled: Arc::default(),
        }
    }

    /// Appends chunks with the given texts.
    #[must_use]
    pub fn with_text_chunks<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script
            .extend(texts.into_iter().map(|text| Ok(RawChunk::text(text))));
        self
    }

    /// Appends a chunk.
    #[must_use]
    pub fn with_chunk(mut self, chunk: RawChunk) -> Self {
        self.script.push(Ok(chunk));
        self
    }

    /// Appends a failure.
    #[must_use]
    pub fn then_fail(mut self, error: ModelClientError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Never ends the stream once the script is exhausted.
    #[must_use]
    pub const fn pending_after_script(mut self) -> Self {
        self.pending_after_script = true;
        self
    }

    /// Returns every recorded call in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns how many scripted items have been pulled across all calls.
    #[must_use]
    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }
}

impl ModelClient for ScriptedModelClient {
    fn selected_model(&self) -> Option<String> {
        self.model.clone()
    }

    fn stream_chat(
        &self,
        messages: MessageList,
        _cancel: CancellationToken,
        options: StreamOptions,
    ) -> RawChunkStream {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall { messages, options });

        let pulled = Arc::clone(&self.pulled);
        let scripted = stream::iter(self.script.clone()).inspect(move |_| {
            pulled.fetch_add(1, Ordering::SeqCst);
        });
        if self.pending_after_script {
            Box::pin(scripted.chain(stream::pending()))
        } else {
            Box::pin(scripted)
        }
    }
}
