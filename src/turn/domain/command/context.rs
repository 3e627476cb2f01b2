//! Auxiliary slash-command data handed to the model client.

use serde::{Deserialize, Serialize};

use super::CommandDescriptor;
use crate::turn::domain::{CodeRange, ContextItem};

/// Describes the command a turn invoked.
///
/// It travels next to the message list rather than inside it, so model
/// clients can see which command produced the rewritten prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashCommandContext {
    /// The invoked command.
    pub command: CommandDescriptor,
    /// Index of the turn's item in the history.
    pub history_index: usize,
    /// Text that followed the command name.
    pub input: String,
    /// Context items attached to the turn.
    #[serde(default)]
    pub context_items: Vec<ContextItem>,
    /// Code selected when the turn was submitted.
    #[serde(default)]
    pub selected_code: Vec<CodeRange>,
}
