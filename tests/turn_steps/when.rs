//! When steps for turn orchestration BDD scenarios.

use colloquy::turn::{domain::EditorState, services::TurnRequest};
use rstest_bdd_macros::when;
use tokio_util::sync::CancellationToken;

use super::world::TurnWorld;

#[when(r#"the user submits "{text}""#)]
fn user_submits(world: &mut TurnWorld, text: String) {
    let request = TurnRequest::new(EditorState::from_text(&text));
    world.submit(request, &CancellationToken::new());
}

#[when(r#"the user cancels and then submits "{text}""#)]
fn user_cancels_then_submits(world: &mut TurnWorld, text: String) {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let request = TurnRequest::new(EditorState::from_text(&text));
    world.submit(request, &cancel);
}
