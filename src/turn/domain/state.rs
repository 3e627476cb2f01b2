//! Lifecycle of a single turn.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a turn's input was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchKind {
    /// The input invoked a slash command.
    Command,
    /// The input is plain conversation.
    Plain,
}

/// State of a turn.
///
/// ```text
/// Idle → ContextGathering → HistoryUpdate → MessageConstruction
///      → Dispatch{Command | Plain} → Streaming → Complete | Cancelled | Failed
/// ```
///
/// Any non-terminal state may also move straight to `Cancelled` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    /// Not started.
    Idle,
    /// Waiting on the context provider.
    ContextGathering,
    /// Computing the updated history.
    HistoryUpdate,
    /// Flattening history into the model's message list.
    MessageConstruction,
    /// Choosing between command and plain handling.
    Dispatch(DispatchKind),
    /// Yielding model output.
    Streaming,
    /// The stream was exhausted normally.
    Complete,
    /// The cancellation signal was observed.
    Cancelled,
    /// The turn aborted with an error.
    Failed,
}

impl TurnState {
    /// Returns `true` if this is a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Cancelled | Self::Failed)
    }

    /// Returns `true` if the turn may move from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if matches!(next, Self::Cancelled | Self::Failed) {
            return true;
        }
        matches!(
            (self, next),
            (Self::Idle, Self::ContextGathering)
                | (Self::ContextGathering, Self::HistoryUpdate)
                | (Self::HistoryUpdate, Self::MessageConstruction)
                | (Self::MessageConstruction, Self::Dispatch(_))
                | (Self::Dispatch(_), Self::Streaming)
                | (Self::Streaming, Self::Complete)
        )
    }

    /// Returns the state as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ContextGathering => "context_gathering",
            Self::HistoryUpdate => "history_update",
            Self::MessageConstruction => "message_construction",
            Self::Dispatch(DispatchKind::Command) => "dispatch_command",
            Self::Dispatch(DispatchKind::Plain) => "dispatch_plain",
            Self::Streaming => "streaming",
            Self::Complete => "complete",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
