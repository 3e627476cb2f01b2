//! Turn orchestration: from submitted input to a stream of model output.

use mockable::Clock;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::in_flight::InFlightSlot;
use super::reporter::EventReporter;
use super::{
    INPUT_KEY, TurnStream, construct_messages, render_template, resolve_with_policy, splice,
};
use crate::turn::config::TurnConfig;
use crate::turn::domain::{
    ContextRequest, DispatchKind, EditorState, GatheredContext, HistoryItem, InputModifiers,
    Message, MessageList, SlashCommandContext, StreamOptions, TurnId, TurnState,
};
use crate::turn::error::TurnError;
use crate::turn::ports::history_store::HistoryStoreError;
use crate::turn::ports::{
    CommandRegistry, ContextProvider, FileReader, HistoryStore, ModelClient, TurnObserver,
};

/// A user submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    editor_state: EditorState,
    modifiers: InputModifiers,
    index: Option<usize>,
    prompt_preamble: Option<String>,
}

impl TurnRequest {
    /// Creates a request that appends a new turn.
    #[must_use]
    pub const fn new(editor_state: EditorState) -> Self {
        Self {
            editor_state,
            modifiers: InputModifiers {
                use_codebase: false,
                no_context: false,
            },
            index: None,
            prompt_preamble: None,
        }
    }

    /// Sets the submission flags.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: InputModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Rewrites the history item at `index` instead of appending.
    ///
    /// Items after `index` are left in the history but are not sent to the
    /// model.
    #[must_use]
    pub const fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Sets text to place ahead of the user's input.
    #[must_use]
    pub fn with_prompt_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.prompt_preamble = Some(preamble.into());
        self
    }

    /// Returns the submitted document.
    #[must_use]
    pub const fn editor_state(&self) -> &EditorState {
        &self.editor_state
    }

    /// Returns the target history index, if the request rewrites one.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }
}

/// The collaborators a turn orchestrator talks to.
#[derive(Clone)]
pub struct TurnPorts {
    /// Caller-owned conversation history.
    pub history: Arc<dyn HistoryStore>,
    /// Resolves context for the submitted input.
    pub context: Arc<dyn ContextProvider>,
    /// The language model.
    pub model: Arc<dyn ModelClient>,
    /// Reads files included by prompt templates.
    pub files: Arc<dyn FileReader>,
    /// Registered slash commands.
    pub commands: Arc<dyn CommandRegistry>,
    /// Receives turn events.
    pub observer: Arc<dyn TurnObserver>,
}

struct PreparedTurn {
    messages: MessageList,
    options: StreamOptions,
}

/// Runs turns against a set of ports.
///
/// At most one turn streams per orchestrator. A turn that reaches its commit
/// point cancels the one still streaming; a turn rejected before that point
/// leaves it running.
pub struct TurnOrchestrator<K>
where
    K: Clock + Send + Sync,
{
    ports: TurnPorts,
    config: TurnConfig,
    clock: Arc<K>,
    in_flight: InFlightSlot,
}

impl<K> TurnOrchestrator<K>
where
    K: Clock + Send + Sync,
{
    /// Creates an orchestrator.
    #[must_use]
    pub fn new(ports: TurnPorts, config: TurnConfig, clock: Arc<K>) -> Self {
        Self {
            ports,
            config,
            clock,
            in_flight: InFlightSlot::default(),
        }
    }

    /// Returns the orchestrator configuration.
    #[must_use]
    pub const fn config(&self) -> &TurnConfig {
        &self.config
    }

    /// Cancels the turn in flight, if any.
    pub fn cancel_in_flight(&self) {
        self.in_flight.cancel();
    }

    /// Returns whether a turn is currently streaming.
    #[must_use]
    pub fn has_turn_in_flight(&self) -> bool {
        self.in_flight.is_occupied()
    }

    /// Executes one turn and returns the stream of model output.
    ///
    /// The turn gathers context, computes the updated history, builds the
    /// message list, resolves and renders a slash command when the input
    /// invokes one, then commits the history item and starts streaming.
    /// Every failure before the commit leaves the history untouched. If
    /// `cancel` fires before streaming starts, including while context is
    /// being gathered or template files are read, the returned stream is
    /// already in [`TurnState::Cancelled`] and the history is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::NoModelSelected`] before doing anything else when
    /// no model is selected, and the matching [`TurnError`] variant when the
    /// context provider, command registry, template renderer or history
    /// store fails.
    pub async fn execute_turn(
        &self,
        request: TurnRequest,
        cancel: &CancellationToken,
    ) -> Result<TurnStream<K>, TurnError> {
        let token = cancel.child_token();
        let mut reporter = EventReporter::new(
            TurnId::new(),
            Arc::clone(&self.ports.observer),
            Arc::clone(&self.clock),
        );
        reporter.started(request.index);

        match self.prepare(request, &token, &mut reporter).await {
            Ok(Some(prepared)) => {
                reporter.transition(TurnState::Streaming);
                let inner =
                    self.ports
                        .model
                        .stream_chat(prepared.messages, token.clone(), prepared.options);
                Ok(TurnStream::from_parts(inner, token, reporter)
                    .occupying(self.in_flight.clone()))
            }
            Ok(None) => Ok(TurnStream::cancelled(token, reporter)),
            Err(error) => {
                reporter.finish(TurnState::Failed, 0);
                Err(error)
            }
        }
    }

    async fn prepare(
        &self,
        request: TurnRequest,
        cancel: &CancellationToken,
        reporter: &mut EventReporter<K>,
    ) -> Result<Option<PreparedTurn>, TurnError> {
        if self.ports.model.selected_model().is_none() {
            return Err(TurnError::NoModelSelected);
        }

        reporter.transition(TurnState::ContextGathering);
        let context_request = ContextRequest {
            editor_state: request.editor_state,
            modifiers: request.modifiers,
            prompt_preamble: request.prompt_preamble,
        };
        let Some(gathered) =
            until_cancelled(cancel, self.ports.context.gather_context(&context_request)).await
        else {
            return Ok(None);
        };
        let GatheredContext {
            items,
            selected_code,
            content,
        } = gathered?;

        reporter.transition(TurnState::HistoryUpdate);
        let snapshot = self.ports.history.snapshot().await?;
        let index = request.index.unwrap_or(snapshot.len());
        let item = HistoryItem::new(Message::user(content)).with_context_items(items.clone());
        let updated = snapshot
            .replaced_at(index, item.clone())
            .map_err(HistoryStoreError::from)?;

        reporter.transition(TurnState::MessageConstruction);
        let messages = construct_messages(
            &updated.prefix(index + 1),
            self.config.system_message.as_deref(),
        );
        let options = StreamOptions::new(self.config.completion.clone());

        let commands = self.ports.commands.list()?;
        let raw_input = item.message().content().leading_text().unwrap_or_default();
        let resolved = resolve_with_policy(raw_input, &commands, self.config.marker_policy);
        let (messages, options) = if let Some(command) = resolved {
            reporter.transition(TurnState::Dispatch(DispatchKind::Command));
            reporter.command_invoked(&command.descriptor.name);
            let substitutions =
                BTreeMap::from([(INPUT_KEY.to_owned(), command.input.to_owned())]);
            let rendering = render_template(
                &command.descriptor.prompt_template,
                self.ports.files.as_ref(),
                &substitutions,
            );
            let Some(rendered) = until_cancelled(cancel, rendering).await else {
                return Ok(None);
            };
            let prompt = rendered?;
            let spliced = splice(&messages, &command.descriptor.name, &prompt);
            let slash_command = SlashCommandContext {
                command: command.descriptor.clone(),
                history_index: index,
                input: command.input.to_owned(),
                context_items: items,
                selected_code,
            };
            (spliced, options.with_slash_command(slash_command))
        } else {
            reporter.transition(TurnState::Dispatch(DispatchKind::Plain));
            (messages, options)
        };

        if cancel.is_cancelled() {
            return Ok(None);
        }
        self.ports.history.put_item(index, item).await?;
        self.in_flight.supersede(reporter.turn_id(), cancel.clone());
        Ok(Some(PreparedTurn { messages, options }))
    }
}

/// Runs `work` until it finishes or `cancel` fires, whichever comes first.
async fn until_cancelled<F>(cancel: &CancellationToken, work: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        output = work => Some(output),
    }
}
