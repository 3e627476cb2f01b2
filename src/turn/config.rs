//! Turn orchestration configuration.

use serde::{Deserialize, Serialize};

use super::domain::CompletionOptions;

/// Whether the leading `/` is required for input to count as a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// `/edit fix it` and `edit fix it` both invoke `edit`.
    #[default]
    Optional,
    /// Only `/edit fix it` invokes `edit`.
    Required,
}

/// Configuration for a turn orchestrator.
///
/// # Examples
///
/// ```
/// use colloquy::turn::config::{MarkerPolicy, TurnConfig};
///
/// let config = TurnConfig::default();
/// assert_eq!(config.marker_policy, MarkerPolicy::Optional);
///
/// let strict = TurnConfig::default().with_marker_policy(MarkerPolicy::Required);
/// assert_eq!(strict.marker_policy, MarkerPolicy::Required);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    /// Command marker handling.
    pub marker_policy: MarkerPolicy,
    /// System message placed ahead of the conversation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
    /// Sampling options forwarded to the model client.
    pub completion: CompletionOptions,
}

impl TurnConfig {
    /// Sets the marker policy.
    #[must_use]
    pub const fn with_marker_policy(mut self, marker_policy: MarkerPolicy) -> Self {
        self.marker_policy = marker_policy;
        self
    }

    /// Sets the system message.
    #[must_use]
    pub fn with_system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }

    /// Sets the completion options.
    #[must_use]
    pub fn with_completion(mut self, completion: CompletionOptions) -> Self {
        self.completion = completion;
        self
    }
}
