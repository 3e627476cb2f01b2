//! Shared test helpers for in-memory turn integration tests.

use std::io;
use std::sync::Arc;

use colloquy::turn::{
    adapters::memory::{
        InMemoryCommandRegistry, InMemoryFileReader, InMemoryHistoryStore, RecordingObserver,
        ScriptedModelClient, StaticContextProvider,
    },
    config::TurnConfig,
    domain::{CommandDescriptor, History, HistoryItem, Message},
    error::TurnError,
    services::{TurnOrchestrator, TurnPorts, TurnStream},
};
use futures::StreamExt;
use mockable::DefaultClock;
use rstest::fixture;
use tokio::runtime::Runtime;

/// Boxed error type returned by the integration tests.
pub type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// In-memory adapters wired into one orchestrator.
#[derive(Clone)]
pub struct Adapters {
    pub history: InMemoryHistoryStore,
    pub commands: InMemoryCommandRegistry,
    pub files: InMemoryFileReader,
    pub context: StaticContextProvider,
    pub model: ScriptedModelClient,
    pub observer: RecordingObserver,
}

impl Adapters {
    /// Builds an orchestrator with `config`.
    #[must_use]
    pub fn orchestrator(&self, config: TurnConfig) -> TurnOrchestrator<DefaultClock> {
        let ports = TurnPorts {
            history: Arc::new(self.history.clone()),
            context: Arc::new(self.context.clone()),
            model: Arc::new(self.model.clone()),
            files: Arc::new(self.files.clone()),
            commands: Arc::new(self.commands.clone()),
            observer: Arc::new(self.observer.clone()),
        };
        TurnOrchestrator::new(ports, config, Arc::new(DefaultClock))
    }

    /// Replaces the model client.
    #[must_use]
    pub fn with_model(mut self, model: ScriptedModelClient) -> Self {
        self.model = model;
        self
    }

    /// Replaces the context provider.
    #[must_use]
    pub fn with_context(mut self, context: StaticContextProvider) -> Self {
        self.context = context;
        self
    }

    /// Replaces the file reader.
    #[must_use]
    pub fn with_files(mut self, files: InMemoryFileReader) -> Self {
        self.files = files;
        self
    }
}

/// Four-item history: two completed exchanges.
#[must_use]
pub fn two_exchanges() -> History {
    History::from_iter([
        HistoryItem::new(Message::user("first question")),
        HistoryItem::new(Message::assistant("first answer")),
        HistoryItem::new(Message::user("second question")),
        HistoryItem::new(Message::assistant("second answer")),
    ])
}

/// Provides adapters over a two-exchange history with `edit` and `commit`
/// registered.
#[fixture]
pub fn adapters() -> Adapters {
    let commands = InMemoryCommandRegistry::with_commands([
        CommandDescriptor::new("edit", "Edit code", "Rewrite the code: {{{ input }}}"),
        CommandDescriptor::new("/commit", "Commit message", "Write a commit message"),
    ])
    .expect("fixture commands must be valid");
    Adapters {
        history: InMemoryHistoryStore::with_history(two_exchanges()),
        commands,
        files: InMemoryFileReader::new(),
        context: StaticContextProvider::new(),
        model: ScriptedModelClient::new("test-model").with_text_chunks(["Sure", ", done."]),
        observer: RecordingObserver::new(),
    }
}

/// Drains `stream`, returning the chunk texts.
///
/// # Errors
///
/// Returns the first transport failure.
pub async fn drain(stream: &mut TurnStream<DefaultClock>) -> Result<Vec<String>, TurnError> {
    let mut texts = Vec::new();
    while let Some(chunk) = stream.next().await {
        texts.push(chunk?.text);
    }
    Ok(texts)
}
