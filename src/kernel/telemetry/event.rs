use serde::{Deserialize, Serialize};

use crate::kernel::outcome::OutcomeKind;
use crate::kernel::state::{ActionId, Phase};
use crate::nlu::Intent;

// Allowed: IDs, Enums, Counts
// Forbidden: Text, Document names, Entities

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    PhaseTransition {
        from: Phase,
        to: Phase,
    },

    Recognized {
        intent: Intent,
    },

    Resolution {
        strategy: ResolutionStrategy,
        matched: bool,
    },

    PendingLifecycle {
        action_id: ActionId,
        event: PendingEventKind,
    },

    Outcome {
        kind: OutcomeKind,
    },

    /// Event arrived for an action that is no longer current.
    StaleDiscarded {
        action_id: ActionId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStrategy {
    Name,
    Newest,
    Residual,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingEventKind {
    Created,
    Confirmed,
    Cancelled,
    Expired,
    Replaced,
    AutoConfirmed,
}
