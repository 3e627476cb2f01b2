//! Turn state tracking and event reporting.

use mockable::Clock;
use std::sync::Arc;

use crate::turn::domain::{TurnEvent, TurnEventKind, TurnId, TurnState};
use crate::turn::ports::TurnObserver;

/// Tracks the state of one turn and reports every change to an observer.
pub(crate) struct EventReporter<K>
where
    K: Clock + Send + Sync,
{
    turn_id: TurnId,
    state: TurnState,
    observer: Arc<dyn TurnObserver>,
    clock: Arc<K>,
}

impl<K> EventReporter<K>
where
    K: Clock + Send + Sync,
{
    /// Creates a reporter for a turn in the `Idle` state.
    pub(crate) fn new(turn_id: TurnId, observer: Arc<dyn TurnObserver>, clock: Arc<K>) -> Self {
        Self::in_state(turn_id, TurnState::Idle, observer, clock)
    }

    /// Creates a reporter for a turn already in `state`.
    pub(crate) fn in_state(
        turn_id: TurnId,
        state: TurnState,
        observer: Arc<dyn TurnObserver>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            turn_id,
            state,
            observer,
            clock,
        }
    }

    pub(crate) const fn turn_id(&self) -> TurnId {
        self.turn_id
    }

    pub(crate) const fn state(&self) -> TurnState {
        self.state
    }

    pub(crate) fn started(&self, history_index: Option<usize>) {
        self.emit(TurnEventKind::Started { history_index });
    }

    pub(crate) fn command_invoked(&self, command: &str) {
        self.emit(TurnEventKind::CommandInvoked {
            command: command.to_owned(),
        });
    }

    /// Moves to `next`. Transitions the state machine does not allow are
    /// ignored.
    pub(crate) fn transition(&mut self, next: TurnState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid turn transition from {} to {next}",
            self.state,
        );
        if !self.state.can_transition_to(next) {
            return;
        }
        let from = self.state;
        self.state = next;
        self.emit(TurnEventKind::StateChanged { from, to: next });
    }

    /// Moves to the terminal `state` and reports the outcome. Does nothing
    /// once a terminal state has been reached.
    pub(crate) fn finish(&mut self, state: TurnState, chunks: usize) {
        if self.state.is_terminal() {
            return;
        }
        self.transition(state);
        self.emit(TurnEventKind::Finished { state, chunks });
    }

    fn emit(&self, kind: TurnEventKind) {
        self.observer.on_event(&TurnEvent {
            turn_id: self.turn_id,
            at: self.clock.utc(),
            kind,
        });
    }
}
