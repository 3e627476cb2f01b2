//! Context provider with fixed context.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::turn::domain::{
    COMMAND_MARKER, CodeRange, ContextItem, ContextRequest, GatheredContext, MessageContent,
};
use crate::turn::ports::context_provider::{ContextGatherError, ContextProvider};

/// Attaches the same context items and selected code to every turn.
///
/// The message content is the editor's plain text, preceded by the prompt
/// preamble when one is given. Text that opens with the command marker keeps
/// its first word in front, so the preamble lands in the command's input and
/// the command still resolves. Unmarked command names are not recognised
/// here. Items are dropped when the request sets `no_context`.
#[derive(Debug, Clone, Default)]
pub struct StaticContextProvider {
    items: Vec<ContextItem>,
    selected_code: Vec<CodeRange>,
    failure: Option<ContextGatherError>,
    requests: Arc<Mutex<Vec<ContextRequest>>>,
}

impl StaticContextProvider {
    /// Creates a provider that attaches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that always fails with `error`.
    #[must_use]
    pub fn failing(error: ContextGatherError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Sets the context items to attach.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = ContextItem>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    /// Sets the selected code to report.
    #[must_use]
    pub fn with_selected_code(mut self, ranges: impl IntoIterator<Item = CodeRange>) -> Self {
        self.selected_code = ranges.into_iter().collect();
        self
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ContextRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ContextProvider for StaticContextProvider {
    async fn gather_context(
        &self,
        request: &ContextRequest,
    ) -> Result<GatheredContext, ContextGatherError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let text = request.editor_state.plain_text();
        let content = match request.prompt_preamble.as_deref() {
            Some(preamble) if !preamble.is_empty() => with_preamble(&text, preamble),
            _ => text,
        };
        let items = if request.modifiers.no_context {
            Vec::new()
        } else {
            self.items.clone()
        };

        Ok(GatheredContext {
            items,
            selected_code: self.selected_code.clone(),
            content: MessageContent::from(content),
        })
    }
}

fn with_preamble(text: &str, preamble: &str) -> String {
    if !text.starts_with(COMMAND_MARKER) {
        return format!("{preamble}{text}");
    }
    match text.split_once(char::is_whitespace) {
        Some((command, input)) => format!("{command} {preamble}{}", input.trim_start()),
        None => format!("{text} {preamble}"),
    }
}
