//! Result of matching input against registered commands.

use super::CommandDescriptor;

/// A command found at the start of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCommand<'a> {
    /// The matched descriptor.
    pub descriptor: &'a CommandDescriptor,
    /// The text after the command name, leading whitespace removed.
    pub input: &'a str,
}
