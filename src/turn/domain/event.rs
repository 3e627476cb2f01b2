//! Events reported to turn observers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TurnId, TurnState};

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    /// The turn the event belongs to.
    pub turn_id: TurnId,
    /// When the event was observed.
    pub at: DateTime<Utc>,
    /// What happened.
    pub kind: TurnEventKind,
}

/// The kinds of turn event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TurnEventKind {
    /// The turn was accepted. `history_index` is the requested target index,
    /// if one was given.
    Started {
        /// Requested target index.
        history_index: Option<usize>,
    },
    /// The turn moved between states.
    StateChanged {
        /// Previous state.
        from: TurnState,
        /// New state.
        to: TurnState,
    },
    /// The input invoked a slash command.
    CommandInvoked {
        /// Command name without the marker.
        command: String,
    },
    /// The turn reached a terminal state.
    Finished {
        /// The terminal state.
        state: TurnState,
        /// Chunks yielded to the caller.
        chunks: usize,
    },
}
