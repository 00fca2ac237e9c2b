use std::collections::{HashMap, VecDeque};

use super::event::{PendingEventKind, TelemetryEvent};
use crate::kernel::outcome::OutcomeKind;
use crate::kernel::state::Phase;
use crate::nlu::Intent;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub recognition_stats: RecognitionStats,
    pub resolution_stats: ResolutionStats,
    pub confirmation_stats: ConfirmationStats,
    pub outcomes: HashMap<OutcomeKind, u64>,
    pub transitions: u64,
    pub stale_discarded: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RecognitionStats {
    pub total: u64,
    pub unknown: u64,
    pub by_intent: HashMap<Intent, u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ResolutionStats {
    pub attempts: u64,
    pub matched: u64,
    pub hit_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmationStats {
    pub created: u64,
    pub confirmed: u64,
    pub cancelled: u64,
    pub expired: u64,
    pub replaced: u64,
    pub auto_confirmed: u64,
    /// Share of created pending actions the user confirmed.
    pub confirm_rate: f64,
    /// Number of times the machine entered `AwaitingConfirmation`.
    pub awaiting_entries: u64,
}

impl TelemetrySnapshot {
    pub fn outcome_count(&self, kind: OutcomeKind) -> u64 {
        self.outcomes.get(&kind).copied().unwrap_or(0)
    }
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::PhaseTransition { to, .. } => {
                snap.transitions += 1;
                if *to == Phase::AwaitingConfirmation {
                    snap.confirmation_stats.awaiting_entries += 1;
                }
            }
            TelemetryEvent::Recognized { intent } => {
                snap.recognition_stats.total += 1;
                if *intent == Intent::Unknown {
                    snap.recognition_stats.unknown += 1;
                }
                *snap.recognition_stats.by_intent.entry(*intent).or_insert(0) += 1;
            }
            TelemetryEvent::Resolution { matched, .. } => {
                snap.resolution_stats.attempts += 1;
                if *matched {
                    snap.resolution_stats.matched += 1;
                }
            }
            TelemetryEvent::PendingLifecycle { event, .. } => {
                let c = &mut snap.confirmation_stats;
                match event {
                    PendingEventKind::Created => c.created += 1,
                    PendingEventKind::Confirmed => c.confirmed += 1,
                    PendingEventKind::Cancelled => c.cancelled += 1,
                    PendingEventKind::Expired => c.expired += 1,
                    PendingEventKind::Replaced => c.replaced += 1,
                    PendingEventKind::AutoConfirmed => c.auto_confirmed += 1,
                }
            }
            TelemetryEvent::Outcome { kind } => {
                *snap.outcomes.entry(*kind).or_insert(0) += 1;
            }
            TelemetryEvent::StaleDiscarded { .. } => snap.stale_discarded += 1,
        }
    }

    if snap.resolution_stats.attempts > 0 {
        snap.resolution_stats.hit_rate =
            snap.resolution_stats.matched as f64 / snap.resolution_stats.attempts as f64;
    }

    if snap.confirmation_stats.created > 0 {
        snap.confirmation_stats.confirm_rate =
            snap.confirmation_stats.confirmed as f64 / snap.confirmation_stats.created as f64;
    }

    snap
}
