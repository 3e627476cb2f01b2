//! Cancellation, supersession and stream failure tests.

use crate::in_memory::helpers::{Adapters, TestResult, adapters, drain, runtime};
use colloquy::turn::{
    adapters::memory::ScriptedModelClient,
    config::TurnConfig,
    domain::{EditorState, TurnState},
    error::TurnError,
    ports::model_client::ModelClientError,
    services::TurnRequest,
};
use futures::StreamExt;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

fn pending_model() -> ScriptedModelClient {
    ScriptedModelClient::new("test-model")
        .with_text_chunks(["partial"])
        .pending_after_script()
}

/// Cancelling mid-stream ends the turn without pulling more chunks.
#[rstest]
fn cancel_mid_stream(
    runtime: io::Result<Runtime>,
    #[from(adapters)] base: Adapters,
) -> TestResult {
    let rt = runtime?;
    let adapters = base.with_model(pending_model());
    let orchestrator = adapters.orchestrator(TurnConfig::default());
    let cancel = CancellationToken::new();

    let (first, rest, state) = rt.block_on(async {
        let mut stream = orchestrator
            .execute_turn(TurnRequest::new(EditorState::from_text("go")), &cancel)
            .await?;
        let first = stream.next().await;
        cancel.cancel();
        let rest = drain(&mut stream).await?;
        Ok::<_, TurnError>((first, rest, stream.state()))
    })?;

    assert_eq!(first.transpose()?.map(|chunk| chunk.text), Some("partial".to_owned()));
    assert!(rest.is_empty());
    assert_eq!(state, TurnState::Cancelled);
    assert_eq!(adapters.model.pulled(), 1);
    assert_eq!(adapters.history.current().len(), 5);
    assert_eq!(
        adapters.observer.finished(),
        Some((TurnState::Cancelled, 1))
    );
    Ok(())
}

/// Starting a turn cancels the one in flight.
#[rstest]
fn new_turn_supersedes_previous(
    runtime: io::Result<Runtime>,
    #[from(adapters)] base: Adapters,
) -> TestResult {
    let rt = runtime?;
    let adapters = base.with_model(pending_model());
    let orchestrator = adapters.orchestrator(TurnConfig::default());
    let cancel = CancellationToken::new();

    let (first_state, second_state) = rt.block_on(async {
        let mut first = orchestrator
            .execute_turn(TurnRequest::new(EditorState::from_text("one")), &cancel)
            .await?;
        let mut second = orchestrator
            .execute_turn(TurnRequest::new(EditorState::from_text("two")), &cancel)
            .await?;
        drain(&mut first).await?;
        let second_first = second.next().await;
        Ok::<_, TurnError>((first.state(), second_first.map(|_| second.state())))
    })?;

    assert_eq!(first_state, TurnState::Cancelled);
    assert_eq!(second_state, Some(TurnState::Streaming));
    assert!(!cancel.is_cancelled());
    Ok(())
}

/// `cancel_in_flight` cancels the current turn.
#[rstest]
fn cancel_in_flight_stops_the_current_turn(
    runtime: io::Result<Runtime>,
    #[from(adapters)] base: Adapters,
) -> TestResult {
    let rt = runtime?;
    let adapters = base.with_model(pending_model());
    let orchestrator = adapters.orchestrator(TurnConfig::default());

    let state = rt.block_on(async {
        let mut stream = orchestrator
            .execute_turn(
                TurnRequest::new(EditorState::from_text("go")),
                &CancellationToken::new(),
            )
            .await?;
        orchestrator.cancel_in_flight();
        drain(&mut stream).await?;
        Ok::<_, TurnError>(stream.state())
    })?;

    assert_eq!(state, TurnState::Cancelled);
    assert_eq!(adapters.model.pulled(), 0);
    Ok(())
}

/// Dropping the stream cancels the turn.
#[rstest]
fn dropping_the_stream_cancels_the_turn(
    runtime: io::Result<Runtime>,
    #[from(adapters)] base: Adapters,
) -> TestResult {
    let rt = runtime?;
    let adapters = base.with_model(pending_model());
    let orchestrator = adapters.orchestrator(TurnConfig::default());

    rt.block_on(async {
        let stream = orchestrator
            .execute_turn(
                TurnRequest::new(EditorState::from_text("go")),
                &CancellationToken::new(),
            )
            .await?;
        drop(stream);
        Ok::<_, TurnError>(())
    })?;

    assert_eq!(
        adapters.observer.finished(),
        Some((TurnState::Cancelled, 0))
    );
    Ok(())
}

/// A transport failure ends the turn after the chunks already delivered.
#[rstest]
fn transport_failure_fails_the_turn(
    runtime: io::Result<Runtime>,
    #[from(adapters)] base: Adapters,
) -> TestResult {
    let rt = runtime?;
    let adapters = base.with_model(
        ScriptedModelClient::new("test-model")
            .with_text_chunks(["Half an ans"])
            .then_fail(ModelClientError::Transport("socket closed".to_owned())),
    );
    let orchestrator = adapters.orchestrator(TurnConfig::default());

    let (texts, failure, state) = rt.block_on(async {
        let mut stream = orchestrator
            .execute_turn(
                TurnRequest::new(EditorState::from_text("go")),
                &CancellationToken::new(),
            )
            .await?;
        let mut texts = Vec::new();
        let mut failure = None;
        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => texts.push(chunk.text),
                Err(error) => failure = Some(error),
            }
        }
        Ok::<_, TurnError>((texts, failure, stream.state()))
    })?;

    assert_eq!(texts, vec!["Half an ans".to_owned()]);
    assert_eq!(
        failure,
        Some(TurnError::Transport("socket closed".to_owned()))
    );
    assert_eq!(state, TurnState::Failed);
    assert_eq!(adapters.observer.finished(), Some((TurnState::Failed, 1)));
    Ok(())
}
