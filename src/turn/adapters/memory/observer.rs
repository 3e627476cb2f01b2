//! Observer that keeps every event.

use std::sync::{Arc, Mutex, PoisonError};

use crate::turn::domain::{TurnEvent, TurnEventKind, TurnState};
use crate::turn::ports::TurnObserver;

/// Records turn events for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<TurnEvent>>>,
}

impl RecordingObserver {
    /// Creates an observer with no events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in order.
    #[must_use]
    pub fn events(&self) -> Vec<TurnEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the states entered, in order.
    #[must_use]
    pub fn states(&self) -> Vec<TurnState> {
        self.events()
            .into_iter()
            .filter_map(|event| match event.kind {
                TurnEventKind::StateChanged { to, .. } => Some(to),
                _ => None,
            })
            .collect()
    }

    /// Returns the terminal state and chunk count of the last finished turn.
    #[must_use]
    pub fn finished(&self) -> Option<(TurnState, usize)> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event.kind {
                TurnEventKind::Finished { state, chunks } => Some((state, chunks)),
                _ => None,
            })
    }
}

impl TurnObserver for RecordingObserver {
    fn on_event(&self, event: &TurnEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
