//! Domain types for the turn subsystem.
//!
//! This module contains pure value types with no infrastructure
//! dependencies. Nothing here performs I/O.

mod chunk;
mod command;
mod content;
mod context;
mod event;
mod ids;
mod message;
mod options;
mod role;
mod sequence;
mod state;

pub use chunk::{NormalizedChunk, RawChunk};
pub use command::{COMMAND_MARKER, CommandDescriptor, ResolvedCommand, SlashCommandContext};
pub(crate) use command::strip_marker;
pub use content::{ContentPart, ImageUrlPart, MessageContent, TextPart};
pub use context::{
    CodeRange, ContextItem, ContextItemUri, ContextRequest, EditorState, GatheredContext,
    InputModifiers,
};
pub use event::{TurnEvent, TurnEventKind};
pub use ids::{MessageId, TurnId};
pub use message::Message;
pub use options::{CompletionOptions, StreamOptions};
pub use role::{ParseRoleError, Role};
pub use sequence::{History, HistoryItem, MessageList, Sequence, SequenceIndexError};
pub use state::{DispatchKind, TurnState};
