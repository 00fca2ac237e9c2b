use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::documents::{DocumentCatalog, KnownDocument};
use crate::nlu::{Command, Intent};

pub type ActionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Listening,
    Recognized,
    Resolved,
    AwaitingConfirmation,
    Executing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Send,
    Select,
}

impl ActionKind {
    pub fn from_intent(intent: Intent) -> Option<Self> {
        match intent {
            Intent::Send => Some(ActionKind::Send),
            Intent::Select => Some(ActionKind::Select),
            _ => None,
        }
    }
}

/// A resolved send/select that is waiting for confirmation or running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAction {
    pub id: ActionId,
    pub kind: ActionKind,
    pub target_document: KnownDocument,
    /// The cue the target was resolved from.
    pub query: String,
    pub source_command: Command,
}

/// Strict state delta. This is the ONLY way state mutates.
#[derive(Debug, Clone)]
pub enum StateDelta {
    PhaseChanged(Phase),
    PendingStored(PendingAction),
    PendingCleared,
    ExecutionStarted(PendingAction),
    ExecutionSettled,
    CommandQueued(Command),
    CommandDequeued,
    DocumentsReplaced(Vec<KnownDocument>),
    DocumentUpserted(KnownDocument),
    DocumentRemoved(String),
}

#[derive(Debug, Clone)]
pub struct SessionState {
    phase: Phase,
    /// Single-writer slot; only the reactor touches it.
    pending: Option<PendingAction>,
    in_flight: Option<PendingAction>,
    queue: VecDeque<Command>,
    documents: DocumentCatalog,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            pending: None,
            in_flight: None,
            queue: VecDeque::new(),
            documents: DocumentCatalog::new(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure reduction: State + Delta -> Mutated State
    pub fn reduce(&mut self, delta: StateDelta) {
        match delta {
            StateDelta::PhaseChanged(phase) => self.phase = phase,
            StateDelta::PendingStored(action) => self.pending = Some(action),
            StateDelta::PendingCleared => self.pending = None,
            StateDelta::ExecutionStarted(action) => {
                // A pending action that starts running is no longer pending.
                if self.pending.as_ref().is_some_and(|p| p.id == action.id) {
                    self.pending = None;
                }
                self.in_flight = Some(action);
            }
            StateDelta::ExecutionSettled => self.in_flight = None,
            StateDelta::CommandQueued(command) => self.queue.push_back(command),
            StateDelta::CommandDequeued => {
                self.queue.pop_front();
            }
            StateDelta::DocumentsReplaced(documents) => self.documents.replace(documents),
            StateDelta::DocumentUpserted(document) => self.documents.upsert(document),
            StateDelta::DocumentRemoved(id) => {
                self.documents.remove(&id);
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn in_flight(&self) -> Option<&PendingAction> {
        self.in_flight.as_ref()
    }

    pub fn queue(&self) -> &VecDeque<Command> {
        &self.queue
    }

    pub fn documents(&self) -> &DocumentCatalog {
        &self.documents
    }

    /// Where the machine settles after handling an utterance.
    pub fn resting_phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Executing
        } else if self.pending.is_some() {
            Phase::AwaitingConfirmation
        } else {
            Phase::Idle
        }
    }
}
