//! Structured-logging turn observer.

use ::tracing::{debug, info, warn};

use crate::turn::domain::{TurnEvent, TurnEventKind, TurnState};
use crate::turn::ports::TurnObserver;

/// Emits every turn event as a `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TurnObserver for TracingObserver {
    fn on_event(&self, event: &TurnEvent) {
        let turn_id = event.turn_id;
        match &event.kind {
            TurnEventKind::Started { history_index } => {
                info!(%turn_id, ?history_index, "turn started");
            }
            TurnEventKind::StateChanged { from, to } => {
                debug!(%turn_id, %from, %to, "turn state changed");
            }
            TurnEventKind::CommandInvoked { command } => {
                info!(%turn_id, command = command.as_str(), "slash command invoked");
            }
            TurnEventKind::Finished {
                state: TurnState::Failed,
                chunks,
            } => {
                warn!(%turn_id, chunks, "turn failed");
            }
            TurnEventKind::Finished { state, chunks } => {
                info!(%turn_id, %state, chunks, "turn finished");
            }
        }
    }
}
