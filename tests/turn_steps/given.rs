//! Given steps for turn orchestration BDD scenarios.

use colloquy::turn::{
    adapters::memory::{InMemoryHistoryStore, ScriptedModelClient, StaticContextProvider},
    domain::{CommandDescriptor, History, HistoryItem, Message},
    ports::context_provider::ContextGatherError,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

use super::world::TurnWorld;

#[given("a conversation with one earlier exchange")]
fn earlier_exchange(world: &mut TurnWorld) {
    world.history = InMemoryHistoryStore::with_history(History::from_iter([
        HistoryItem::new(Message::user("What does this crate do?")),
        HistoryItem::new(Message::assistant("It orchestrates chat turns.")),
    ]));
}

#[given(r#"a model that replies "{reply}""#)]
fn model_replies(world: &mut TurnWorld, reply: String) {
    world.model = ScriptedModelClient::new("test-model").with_text_chunks([reply]);
}

#[given("no model is selected")]
fn no_model(world: &mut TurnWorld) {
    world.model = ScriptedModelClient::without_model();
}

#[given(r#"a registered command "{name}" with template "{template}""#)]
fn registered_command(
    world: &mut TurnWorld,
    name: String,
    template: String,
) -> Result<(), eyre::Report> {
    world
        .commands
        .register(CommandDescriptor::new(name, "", template))
        .wrap_err("register scenario command")
}

#[given(r#"a file "{path}" containing "{contents}""#)]
fn file_containing(world: &mut TurnWorld, path: String, contents: String) {
    world.files = world.files.clone().with_file(path, contents);
}

#[given("a context provider that fails")]
fn failing_context(world: &mut TurnWorld) {
    world.context = StaticContextProvider::failing(ContextGatherError::ResolutionFailed(
        "file vanished".to_owned(),
    ));
}
