//! Observability hook for the decision engine.
//!
//! The engine reports what it does through an [`EventSink`]. The default
//! [`TracingSink`] forwards to `tracing`; a `Vec<EngineEvent>` records
//! events for inspection.

use crate::error::TickError;
use crate::objective::{ObjectiveId, Slot, TailKind};
use crate::protocol::Command;

/// Something the engine did during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The update was rejected and the tick skipped.
    TickDropped {
        /// Turn of the rejected update.
        turn: u32,
        /// Why it was rejected.
        error: TickError,
    },
    /// The general reached the start threshold.
    GateOpened {
        /// Turn the gate opened.
        turn: u32,
        /// General army at that point.
        army: u32,
    },
    /// A new tail objective was queued.
    Discovered {
        /// Handle of the new objective.
        id: ObjectiveId,
        /// Discovery or exploration.
        kind: TailKind,
        /// Tile the objective aims at.
        target: usize,
    },
    /// A tail objective was dropped to respect the capacity bound.
    Evicted {
        /// Handle of the dropped objective.
        id: ObjectiveId,
    },
    /// Evaluation order for the tick.
    Ordered {
        /// Current turn.
        turn: u32,
        /// Slots in evaluation order.
        order: Vec<Slot>,
    },
    /// An objective produced the tick's command.
    Chose {
        /// Slot that produced it.
        slot: Slot,
        /// The command.
        command: Command,
    },
    /// An objective reported it was finished.
    Retired {
        /// Slot that finished.
        slot: Slot,
    },
    /// No objective produced a command.
    Idle {
        /// Current turn.
        turn: u32,
    },
}

/// Receiver of engine events.
pub trait EventSink {
    /// Record one event.
    fn record(&mut self, event: EngineEvent);
}

/// Forwards events to `tracing` under the `vanguard::engine` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::TickDropped { turn, error } => {
                tracing::warn!(target: "vanguard::engine", turn, %error, "tick dropped");
            }
            EngineEvent::GateOpened { turn, army } => {
                tracing::info!(target: "vanguard::engine", turn, army, "engine ready");
            }
            EngineEvent::Discovered { id, kind, target } => {
                tracing::debug!(target: "vanguard::engine", %id, ?kind, tile = target, "objective discovered");
            }
            EngineEvent::Evicted { id } => {
                tracing::debug!(target: "vanguard::engine", %id, "objective evicted");
            }
            EngineEvent::Ordered { turn, order } => {
                tracing::trace!(target: "vanguard::engine", turn, ?order, "evaluation order");
            }
            EngineEvent::Chose { slot, command } => {
                tracing::debug!(target: "vanguard::engine", ?slot, from = command.from, to = command.to, half = command.half, "move");
            }
            EngineEvent::Retired { slot } => {
                tracing::trace!(target: "vanguard::engine", ?slot, "objective retired");
            }
            EngineEvent::Idle { turn } => {
                tracing::trace!(target: "vanguard::engine", turn, "no move");
            }
        }
    }
}

impl EventSink for Vec<EngineEvent> {
    fn record(&mut self, event: EngineEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: EngineEvent) {
        (**self).record(event);
    }
}
