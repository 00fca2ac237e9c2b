use serde::{Deserialize, Serialize};

use super::executor::{ExecutionError, ExecutionReport};
use super::state::PendingAction;
use crate::documents::KnownDocument;
use crate::nlu::{Command, Intent};

/// User-facing result of a step. Every branch of normal voice operation is
/// an outcome; the caller turns these into spoken or on-screen feedback.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Help {
        examples: Vec<String>,
    },
    NotUnderstood {
        command: Command,
    },
    /// Recognizer was unsure; ask the user to repeat more clearly.
    LowConfidence {
        command: Command,
        confidence: f32,
    },
    NotFound {
        command: Command,
        query: String,
        alternatives: Vec<KnownDocument>,
    },
    AwaitingConfirmation {
        action: PendingAction,
    },
    PendingReplaced {
        previous: PendingAction,
    },
    AlreadyPending {
        pending: PendingAction,
        rejected: Command,
    },
    Queued {
        command: Command,
        position: usize,
    },
    QueueFull {
        command: Command,
    },
    Cancelled {
        action: PendingAction,
    },
    ConfirmationExpired {
        action: PendingAction,
    },
    /// Confirm or cancel with nothing to act on.
    NothingPending {
        intent: Intent,
    },
    Busy {
        command: Command,
    },
    Executed {
        action: PendingAction,
        report: ExecutionReport,
    },
    ExecutionFailed {
        action: PendingAction,
        error: ExecutionError,
    },
    PermissionDenied {
        action: PendingAction,
        reason: String,
    },
}

/// Content-free label of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    Help,
    NotUnderstood,
    LowConfidence,
    NotFound,
    AwaitingConfirmation,
    PendingReplaced,
    AlreadyPending,
    Queued,
    QueueFull,
    Cancelled,
    ConfirmationExpired,
    NothingPending,
    Busy,
    Executed,
    ExecutionFailed,
    PermissionDenied,
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Help { .. } => OutcomeKind::Help,
            Outcome::NotUnderstood { .. } => OutcomeKind::NotUnderstood,
            Outcome::LowConfidence { .. } => OutcomeKind::LowConfidence,
            Outcome::NotFound { .. } => OutcomeKind::NotFound,
            Outcome::AwaitingConfirmation { .. } => OutcomeKind::AwaitingConfirmation,
            Outcome::PendingReplaced { .. } => OutcomeKind::PendingReplaced,
            Outcome::AlreadyPending { .. } => OutcomeKind::AlreadyPending,
            Outcome::Queued { .. } => OutcomeKind::Queued,
            Outcome::QueueFull { .. } => OutcomeKind::QueueFull,
            Outcome::Cancelled { .. } => OutcomeKind::Cancelled,
            Outcome::ConfirmationExpired { .. } => OutcomeKind::ConfirmationExpired,
            Outcome::NothingPending { .. } => OutcomeKind::NothingPending,
            Outcome::Busy { .. } => OutcomeKind::Busy,
            Outcome::Executed { .. } => OutcomeKind::Executed,
            Outcome::ExecutionFailed { .. } => OutcomeKind::ExecutionFailed,
            Outcome::PermissionDenied { .. } => OutcomeKind::PermissionDenied,
        }
    }

    /// True for outcomes that leave the user with nothing done and nothing pending
    /// because of recognition or lookup trouble.
    pub fn is_recoverable_miss(&self) -> bool {
        matches!(
            self.kind(),
            OutcomeKind::NotUnderstood | OutcomeKind::LowConfidence | OutcomeKind::NotFound
        )
    }
}
