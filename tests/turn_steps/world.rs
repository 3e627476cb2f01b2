//! Shared world state for turn orchestration BDD scenarios.

use std::sync::Arc;

use colloquy::turn::{
    adapters::memory::{
        InMemoryCommandRegistry, InMemoryFileReader, InMemoryHistoryStore, RecordingObserver,
        ScriptedModelClient, StaticContextProvider,
    },
    config::TurnConfig,
    domain::{History, TurnState},
    error::TurnError,
    services::{TurnOrchestrator, TurnPorts, TurnRequest},
};
use futures::StreamExt;
use mockable::DefaultClock;
use rstest::fixture;
use tokio_util::sync::CancellationToken;

/// Outcome of one executed turn.
pub struct TurnOutcome {
    pub chunks: Result<Vec<String>, TurnError>,
    pub final_state: Option<TurnState>,
}

/// Scenario world for turn orchestration behaviour tests.
pub struct TurnWorld {
    pub history: InMemoryHistoryStore,
    pub history_before: Option<History>,
    pub commands: InMemoryCommandRegistry,
    pub files: InMemoryFileReader,
    pub context: StaticContextProvider,
    pub model: ScriptedModelClient,
    pub observer: RecordingObserver,
    pub outcome: Option<TurnOutcome>,
}

impl TurnWorld {
    /// Creates a world with an empty history and a silent model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: InMemoryHistoryStore::new(),
            history_before: None,
            commands: InMemoryCommandRegistry::new(),
            files: InMemoryFileReader::new(),
            context: StaticContextProvider::new(),
            model: ScriptedModelClient::new("test-model"),
            observer: RecordingObserver::new(),
            outcome: None,
        }
    }

    /// Builds an orchestrator over the world's adapters.
    #[must_use]
    pub fn orchestrator(&self) -> TurnOrchestrator<DefaultClock> {
        let ports = TurnPorts {
            history: Arc::new(self.history.clone()),
            context: Arc::new(self.context.clone()),
            model: Arc::new(self.model.clone()),
            files: Arc::new(self.files.clone()),
            commands: Arc::new(self.commands.clone()),
            observer: Arc::new(self.observer.clone()),
        };
        TurnOrchestrator::new(ports, TurnConfig::default(), Arc::new(DefaultClock))
    }

    /// Runs one turn to completion and records the outcome.
    pub fn submit(&mut self, request: TurnRequest, cancel: &CancellationToken) {
        self.history_before = Some(self.history.current());
        let orchestrator = self.orchestrator();
        let outcome = run_async(async {
            match orchestrator.execute_turn(request, cancel).await {
                Ok(mut stream) => {
                    let mut texts = Vec::new();
                    while let Some(item) = stream.next().await {
                        match item {
                            Ok(chunk) => texts.push(chunk.text),
                            Err(error) => {
                                return TurnOutcome {
                                    chunks: Err(error),
                                    final_state: Some(stream.state()),
                                };
                            }
                        }
                    }
                    TurnOutcome {
                        chunks: Ok(texts),
                        final_state: Some(stream.state()),
                    }
                }
                Err(error) => TurnOutcome {
                    chunks: Err(error),
                    final_state: None,
                },
            }
        });
        self.outcome = Some(outcome);
    }
}

impl Default for TurnWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TurnWorld {
    TurnWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
