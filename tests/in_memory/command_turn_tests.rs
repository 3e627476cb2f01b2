//! Slash-command turn tests: resolution, rendering and splicing.

use crate::in_memory::helpers::{Adapters, TestResult, adapters, drain, runtime};
use colloquy::turn::{
    adapters::memory::{InMemoryFileReader, StaticContextProvider},
    config::{MarkerPolicy, TurnConfig},
    domain::{CodeRange, ContextItem, EditorState, MessageList},
    error::{TemplateError, TurnError},
    services::TurnRequest,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

fn last_sent_text(messages: &MessageList) -> Option<String> {
    messages
        .last()
        .and_then(|message| message.content().leading_text())
        .map(str::to_owned)
}

/// A command turn sends the rendered prompt but records the raw input.
#[rstest]
fn command_prompt_replaces_the_input(
    runtime: io::Result<Runtime>,
    #[from(adapters)] base: Adapters,
) -> TestResult {
    let rt = runtime?;
    let selection = CodeRange::new("src/lib.rs", 3, 9, "fn total() {}");
    let adapters = base.with_context(
        StaticContextProvider::new()
            .with_items([ContextItem::new("lib.rs", "pub mod turn;")])
            .with_selected_code([selection.clone()]),
    );
    let orchestrator = adapters.orchestrator(TurnConfig::default());

    rt.block_on(async {
        let mut stream = orchestrator
            .execute_turn(
                TurnRequest::new(EditorState::from_text("/edit use iterators")),
                &CancellationToken::new(),
            )
            .await?;
        drain(&mut stream).await
    })?;

    let calls = adapters.model.calls();
    let call = calls.first().ok_or("model not called")?;
    assert_eq!(
        last_sent_text(&call.messages).as_deref(),
        Some("Rewrite the code: use iterators")
    );
    let slash = call
        .options
        .slash_command
        .as_ref()
        .ok_or("slash command context missing")?;
    assert_eq!(slash.command.name, "edit");
    assert_eq!(slash.input, "use iterators");
    assert_eq!(slash.history_index, 4);
    assert_eq!(slash.selected_code, vec![selection]);
    assert_eq!(slash.context_items.len(), 1);

    let history = adapters.history.current();
    assert_eq!(
        history
            .last()
            .and_then(|item| item.message().content().leading_text()),
        Some("/edit use iterators")
    );
    Ok(())
}

/// Templates without an input placeholder get the input appended.
#[rstest]
fn template_without_placeholder_appends_input(
    runtime: io::Result<Runtime>,
    adapters: Adapters,
) -> TestResult {
    let rt = runtime?;
    let orchestrator = adapters.orchestrator(TurnConfig::default());

    rt.block_on(async {
        let mut stream = orchestrator
            .execute_turn(
                TurnRequest::new(EditorState::from_text("commit tidy the parser")),
                &CancellationToken::new(),
            )
            .await?;
        drain(&mut stream).await
    })?;

    let calls = adapters.model.calls();
    let call = calls.first().ok_or("model not called")?;
    assert_eq!(
        last_sent_text(&call.messages).as_deref(),
        Some("Write a commit message\n\ntidy the parser")
    );
    Ok(())
}

/// With the marker required, bare command names are plain input.
#[rstest]
#[case("edit use iterators", false)]
#[case("/edit use iterators", true)]
fn required_marker_policy(
    runtime: io::Result<Runtime>,
    adapters: Adapters,
    #[case] input: &str,
    #[case] is_command: bool,
) -> TestResult {
    let rt = runtime?;
    let config = TurnConfig::default().with_marker_policy(MarkerPolicy::Required);
    let orchestrator = adapters.orchestrator(config);

    rt.block_on(async {
        let mut stream = orchestrator
            .execute_turn(
                TurnRequest::new(EditorState::from_text(input)),
                &CancellationToken::new(),
            )
            .await?;
        drain(&mut stream).await
    })?;

    let calls = adapters.model.calls();
    let call = calls.first().ok_or("model not called")?;
    assert_eq!(call.options.slash_command.is_some(), is_command);
    Ok(())
}

/// Unknown commands pass through untouched.
#[rstest]
fn unknown_command_is_plain_input(
    runtime: io::Result<Runtime>,
    adapters: Adapters,
) -> TestResult {
    let rt = runtime?;
    let orchestrator = adapters.orchestrator(TurnConfig::default());

    rt.block_on(async {
        let mut stream = orchestrator
            .execute_turn(
                TurnRequest::new(EditorState::from_text("/deploy now")),
                &CancellationToken::new(),
            )
            .await?;
        drain(&mut stream).await
    })?;

    let calls = adapters.model.calls();
    let call = calls.first().ok_or("model not called")?;
    assert_eq!(last_sent_text(&call.messages).as_deref(), Some("/deploy now"));
    assert!(call.options.slash_command.is_none());
    Ok(())
}

/// Template includes are read through the file reader.
#[rstest]
fn template_includes_are_resolved(
    runtime: io::Result<Runtime>,
    #[from(adapters)] base: Adapters,
) -> TestResult {
    let rt = runtime?;
    let files = InMemoryFileReader::new().with_file("style.md", "Prefer iterators.");
    let adapters = base.with_files(files.clone());
    adapters.commands.register(
        colloquy::turn::domain::CommandDescriptor::new(
            "style",
            "Apply the style guide",
            "{{{ style.md }}}\n{{{ input }}}",
        ),
    )?;
    let orchestrator = adapters.orchestrator(TurnConfig::default());

    rt.block_on(async {
        let mut stream = orchestrator
            .execute_turn(
                TurnRequest::new(EditorState::from_text("/style src/lib.rs")),
                &CancellationToken::new(),
            )
            .await?;
        drain(&mut stream).await
    })?;

    let calls = adapters.model.calls();
    let call = calls.first().ok_or("model not called")?;
    assert_eq!(
        last_sent_text(&call.messages).as_deref(),
        Some("Prefer iterators.\nsrc/lib.rs")
    );
    assert_eq!(files.reads(), vec!["style.md".to_owned()]);
    Ok(())
}

/// A missing include aborts the turn before the history changes.
#[rstest]
fn missing_include_aborts_without_mutation(
    runtime: io::Result<Runtime>,
    adapters: Adapters,
) -> TestResult {
    let rt = runtime?;
    adapters.commands.register(
        colloquy::turn::domain::CommandDescriptor::new(
            "style",
            "Apply the style guide",
            "{{{ missing.md }}} {{{ input }}}",
        ),
    )?;
    let orchestrator = adapters.orchestrator(TurnConfig::default());
    let before = adapters.history.current();

    let result = rt.block_on(orchestrator.execute_turn(
        TurnRequest::new(EditorState::from_text("/style src/lib.rs")),
        &CancellationToken::new(),
    ));

    assert!(matches!(
        result,
        Err(TurnError::Template(TemplateError::FileNotFound { ref path })) if path == "missing.md"
    ));
    assert!(adapters.history.current().ptr_eq(&before));
    assert!(adapters.model.calls().is_empty());
    Ok(())
}

/// A prompt preamble joins the command input instead of hiding the command.
#[rstest]
fn preamble_keeps_the_command_resolvable(
    runtime: io::Result<Runtime>,
    adapters: Adapters,
) -> TestResult {
    let rt = runtime?;
    let orchestrator = adapters.orchestrator(TurnConfig::default());

    rt.block_on(async {
        let mut stream = orchestrator
            .execute_turn(
                TurnRequest::new(EditorState::from_text("/edit use iterators"))
                    .with_prompt_preamble("Be brief. "),
                &CancellationToken::new(),
            )
            .await?;
        drain(&mut stream).await
    })?;

    let calls = adapters.model.calls();
    let call = calls.first().ok_or("model not called")?;
    assert_eq!(
        last_sent_text(&call.messages).as_deref(),
        Some("Rewrite the code: Be brief. use iterators")
    );
    assert_eq!(
        call.options
            .slash_command
            .as_ref()
            .map(|slash| slash.input.as_str()),
        Some("Be brief. use iterators")
    );
    Ok(())
}
