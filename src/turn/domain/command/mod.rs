//! Slash-command domain model.

mod context;
mod descriptor;
mod resolved;

pub use context::SlashCommandContext;
pub use descriptor::{COMMAND_MARKER, CommandDescriptor};
pub(crate) use descriptor::strip_marker;
pub use resolved::ResolvedCommand;
