//! Port for side-effect-only turn observers (logging, analytics).

use crate::turn::domain::TurnEvent;

/// Receives turn events.
///
/// Observers must not influence the turn: they cannot fail and their return
/// value is ignored.
pub trait TurnObserver: Send + Sync {
    /// Handles one event.
    fn on_event(&self, event: &TurnEvent);
}
