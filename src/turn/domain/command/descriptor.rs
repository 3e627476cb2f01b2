//! Slash-command descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The marker that introduces a command in user input.
pub const COMMAND_MARKER: char = '/';

/// A registered slash command.
///
/// Descriptors are created once when configuration is loaded and are
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Command name without the leading marker. Matched case-sensitively.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Prompt template rendered with the text following the command.
    pub prompt_template: String,
    /// Free-form parameters supplied by configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, Value>>,
}

impl CommandDescriptor {
    /// Creates a descriptor, dropping a leading `/` from `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use colloquy::turn::domain::CommandDescriptor;
    ///
    /// let command = CommandDescriptor::new("/edit", "Edit code", "Rewrite: {{{ input }}}");
    /// assert_eq!(command.name, "edit");
    /// ```
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        prompt_template: impl Into<String>,
    ) -> Self {
        Self {
            name: strip_marker(&name.into()).to_owned(),
            description: description.into(),
            prompt_template: prompt_template.into(),
            parameters: None,
        }
    }

    /// Sets the configuration parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: BTreeMap<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Removes one leading [`COMMAND_MARKER`], if present.
#[must_use]
pub(crate) fn strip_marker(text: &str) -> &str {
    text.strip_prefix(COMMAND_MARKER).unwrap_or(text)
}
