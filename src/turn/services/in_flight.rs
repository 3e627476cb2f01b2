//! The single in-flight turn slot shared by an orchestrator and its streams.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

use crate::turn::domain::TurnId;

/// Holds the cancellation token of the turn currently streaming.
///
/// A stream releases the slot when it reaches a terminal state, so a
/// finished turn never keeps a token alive.
#[derive(Debug, Clone, Default)]
pub(crate) struct InFlightSlot {
    current: Arc<Mutex<Option<(TurnId, CancellationToken)>>>,
}

impl InFlightSlot {
    fn lock(&self) -> MutexGuard<'_, Option<(TurnId, CancellationToken)>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs `token` for `turn_id` and cancels the turn it replaces.
    pub(crate) fn supersede(&self, turn_id: TurnId, token: CancellationToken) {
        let previous = self.lock().replace((turn_id, token));
        if let Some((previous_id, previous_token)) = previous {
            tracing::debug!(turn_id = %turn_id, superseded = %previous_id, "superseding in-flight turn");
            previous_token.cancel();
        }
    }

    /// Clears the slot if it still belongs to `turn_id`.
    pub(crate) fn release(&self, turn_id: TurnId) {
        let mut guard = self.lock();
        if guard.as_ref().is_some_and(|(owner, _)| *owner == turn_id) {
            *guard = None;
        }
    }

    /// Cancels the turn in the slot, if any.
    pub(crate) fn cancel(&self) {
        if let Some((_, token)) = self.lock().take() {
            token.cancel();
        }
    }

    pub(crate) fn is_occupied(&self) -> bool {
        self.lock().is_some()
    }
}
