use std::time::Duration;

use super::outcome::Outcome;
use super::reactor::ReactorConfig;
use super::state::{ActionId, Phase, PendingAction, StateDelta};

pub struct Scheduler;

/// Work the driver performs on behalf of the pure step.
#[derive(Debug, Clone)]
pub enum SideEffect {
    Report(Outcome),
    Execute(PendingAction),
    ArmConfirmationTimer { action_id: ActionId, after: Duration },
    DisarmConfirmationTimer { action_id: ActionId },
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub delta: StateDelta,
    pub effects: Vec<SideEffect>,
    pub next_phase: Phase,
}

impl Scheduler {
    /// Pure Projection: resolved action + config -> (StateDelta, SideEffects).
    ///
    /// Confident or auto-confirmed actions run immediately; everything else
    /// waits in the pending slot, with a timer when one is configured.
    pub fn schedule(&self, action: PendingAction, config: &ReactorConfig) -> Schedule {
        let confident = action
            .source_command
            .confidence
            .is_some_and(|c| c >= config.confidence_threshold);

        if config.auto_confirm || confident {
            return Schedule {
                delta: StateDelta::ExecutionStarted(action.clone()),
                effects: vec![SideEffect::Execute(action)],
                next_phase: Phase::Executing,
            };
        }

        let mut effects = Vec::new();
        if let Some(after) = config.confirmation_timeout() {
            effects.push(SideEffect::ArmConfirmationTimer {
                action_id: action.id,
                after,
            });
        }
        effects.push(SideEffect::Report(Outcome::AwaitingConfirmation {
            action: action.clone(),
        }));

        Schedule {
            delta: StateDelta::PendingStored(action),
            effects,
            next_phase: Phase::AwaitingConfirmation,
        }
    }
}
