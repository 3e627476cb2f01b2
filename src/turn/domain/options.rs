//! Options forwarded to the model client with every streamed request.

use serde::{Deserialize, Serialize};

use super::SlashCommandContext;

/// Sampling options passed through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Upper bound on generated tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Stop sequences.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

/// Everything besides the messages that accompanies a model call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamOptions {
    /// Sampling options.
    pub completion: CompletionOptions,
    /// Present when the turn invoked a slash command.
    pub slash_command: Option<SlashCommandContext>,
}

impl StreamOptions {
    /// Creates options without slash-command data.
    #[must_use]
    pub const fn new(completion: CompletionOptions) -> Self {
        Self {
            completion,
            slash_command: None,
        }
    }

    /// Attaches slash-command data.
    #[must_use]
    pub fn with_slash_command(mut self, slash_command: SlashCommandContext) -> Self {
        self.slash_command = Some(slash_command);
        self
    }
}
