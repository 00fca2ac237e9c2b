use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::cancel::ConfirmationTimers;
use super::event::{Event, InputContent, InputEvent};
use super::executor::{DocumentExecutor, ExecutionError, ExecutionReport};
use super::outcome::Outcome;
use super::scheduler::{Scheduler, SideEffect};
use super::state::{ActionId, ActionKind, PendingAction, Phase, SessionState, StateDelta};
use super::telemetry::event::{PendingEventKind, ResolutionStrategy, TelemetryEvent};
use super::telemetry::recorder::TelemetryRecorder;
use crate::config::{AppConfig, ConfigError};
use crate::nlu::{
    fuzzy_find_doc, nearest_alternatives, newest, Command, Intent, Interpreter, ResolutionCue,
    Utterance,
};

/// What to do with a new send/select while another action awaits confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingPolicy {
    /// Replace the pending action once the new command resolves.
    Overwrite,
    /// Keep the pending action and tell the user one is already waiting.
    Reject,
    /// Hold the new command and process it after the pending one settles.
    Queue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorConfig {
    /// Recognizer confidence at or above which actions skip confirmation.
    pub confidence_threshold: f32,
    pub auto_confirm: bool,
    /// Below this the utterance is reported as `LowConfidence`.
    pub min_asr_confidence: f32,
    pub pending_policy: PendingPolicy,
    /// `None` keeps pending actions until confirmed or cancelled.
    pub confirmation_timeout_ms: Option<u64>,
    pub execution_timeout_ms: u64,
    pub max_queued: usize,
    pub max_alternatives: usize,
    pub alternative_similarity: f64,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.9,
            auto_confirm: false,
            min_asr_confidence: 0.4,
            pending_policy: PendingPolicy::Reject,
            confirmation_timeout_ms: Some(30_000),
            execution_timeout_ms: 10_000,
            max_queued: 4,
            max_alternatives: 3,
            alternative_similarity: 0.7,
        }
    }
}

pub struct Reactor {
    pub receiver: mpsc::Receiver<Event>,
    // Sender clone for tasks spawned by the driver
    tx_clone: mpsc::Sender<Event>,
    pub state: SessionState,
    pub scheduler: Scheduler,
    pub telemetry: TelemetryRecorder,
    pub config: ReactorConfig,
    interpreter: Interpreter,
    help_examples: Vec<String>,
}

impl Reactor {
    pub fn new(
        receiver: mpsc::Receiver<Event>,
        tx: mpsc::Sender<Event>,
        config: AppConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            receiver,
            tx_clone: tx,
            state: SessionState::new(),
            scheduler: Scheduler,
            telemetry: TelemetryRecorder::new(),
            interpreter: Interpreter::new(&config.nlu)?,
            help_examples: config.nlu.help_examples,
            config: config.reactor,
        })
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Pure step: folds events into state in arrival order and returns the
    /// side effects for the driver. MUST NOT await I/O or timers.
    pub fn tick_step(&mut self, events: Vec<Event>) -> Vec<SideEffect> {
        let mut effects = Vec::new();
        for event in events {
            self.handle_event(event, &mut effects);
        }
        effects
    }

    fn handle_event(&mut self, event: Event, effects: &mut Vec<SideEffect>) {
        match event {
            Event::Input(InputEvent { source, content }) => match content {
                InputContent::ListeningStarted => {
                    if self.state.phase() == Phase::Idle {
                        self.transition(Phase::Listening);
                    } else {
                        debug!("Listening started from {} in {:?}", source, self.state.phase());
                    }
                }
                InputContent::ListeningAborted => {
                    if self.state.phase() == Phase::Listening {
                        self.transition(Phase::Idle);
                    }
                }
                InputContent::Utterance(utterance) => {
                    debug!("Utterance from {}", source);
                    self.handle_utterance(utterance, effects);
                }
            },
            Event::DocumentsReplaced(documents) => {
                self.state.reduce(StateDelta::DocumentsReplaced(documents));
                info!("Document list replaced ({} documents)", self.state.documents().len());
            }
            Event::DocumentUpserted(document) => {
                self.state.reduce(StateDelta::DocumentUpserted(document));
                debug!("Document upserted ({} known)", self.state.documents().len());
            }
            Event::DocumentRemoved(id) => {
                self.state.reduce(StateDelta::DocumentRemoved(id));
                debug!("Document removed ({} known)", self.state.documents().len());
            }
            Event::ExecutionFinished { action_id, result } => {
                self.handle_execution_finished(action_id, result, effects);
            }
            Event::ConfirmationExpired { action_id } => {
                self.handle_confirmation_expired(action_id, effects);
            }
        }
    }

    fn handle_utterance(&mut self, utterance: Utterance, effects: &mut Vec<SideEffect>) {
        let command = self.interpreter.interpret(&utterance);

        // No mid-execution interleaving: the executor owns this window.
        if self.state.phase() == Phase::Executing {
            self.report(Outcome::Busy { command }, effects);
            return;
        }

        self.transition(Phase::Recognized);
        self.telemetry.record(TelemetryEvent::Recognized {
            intent: command.intent,
        });

        if let Some(confidence) = command.confidence {
            if confidence < self.config.min_asr_confidence {
                self.report(Outcome::LowConfidence { command, confidence }, effects);
                self.settle();
                return;
            }
        }

        self.dispatch(command, effects);
    }

    /// Routes a recognized command. Expects phase `Recognized`.
    fn dispatch(&mut self, command: Command, effects: &mut Vec<SideEffect>) {
        match command.intent {
            Intent::Send | Intent::Select => {
                if let Some(pending) = self.state.pending() {
                    match self.config.pending_policy {
                        PendingPolicy::Overwrite => {}
                        PendingPolicy::Reject => {
                            let pending = pending.clone();
                            self.report(
                                Outcome::AlreadyPending {
                                    pending,
                                    rejected: command,
                                },
                                effects,
                            );
                            self.settle();
                            return;
                        }
                        PendingPolicy::Queue => {
                            if self.state.queue().len() >= self.config.max_queued {
                                self.report(Outcome::QueueFull { command }, effects);
                            } else {
                                let position = self.state.queue().len() + 1;
                                self.state.reduce(StateDelta::CommandQueued(command.clone()));
                                self.report(Outcome::Queued { command, position }, effects);
                            }
                            self.settle();
                            return;
                        }
                    }
                }
                self.resolve_and_schedule(command, effects);
            }
            Intent::Confirm => match self.state.pending().cloned() {
                Some(action) => {
                    effects.push(SideEffect::DisarmConfirmationTimer {
                        action_id: action.id,
                    });
                    self.record_pending(action.id, PendingEventKind::Confirmed);
                    self.start_execution(action, effects);
                }
                None => {
                    self.report(Outcome::NothingPending { intent: Intent::Confirm }, effects);
                    self.settle();
                }
            },
            Intent::Cancel => match self.state.pending().cloned() {
                Some(action) => {
                    effects.push(SideEffect::DisarmConfirmationTimer {
                        action_id: action.id,
                    });
                    self.state.reduce(StateDelta::PendingCleared);
                    self.record_pending(action.id, PendingEventKind::Cancelled);
                    self.report(Outcome::Cancelled { action }, effects);
                    self.settle();
                    self.drain_queue(effects);
                }
                None => {
                    self.report(Outcome::NothingPending { intent: Intent::Cancel }, effects);
                    self.settle();
                }
            },
            Intent::Help => {
                let examples = self.help_examples.clone();
                self.report(Outcome::Help { examples }, effects);
                self.settle();
            }
            Intent::Unknown => {
                self.report(Outcome::NotUnderstood { command }, effects);
                self.settle();
            }
        }
    }

    fn resolve_and_schedule(&mut self, command: Command, effects: &mut Vec<SideEffect>) {
        let Some(kind) = ActionKind::from_intent(command.intent) else {
            return;
        };

        let cue = self.interpreter.resolution_cue(&command);
        if self.state.documents().is_empty() {
            warn!("Resolving {:?} against an empty document list", kind);
        }
        let documents = self.state.documents().documents();
        let (strategy, target, query) = match &cue {
            ResolutionCue::Name(name) => (
                ResolutionStrategy::Name,
                fuzzy_find_doc(name, documents),
                name.clone(),
            ),
            ResolutionCue::Newest => (
                ResolutionStrategy::Newest,
                newest(documents),
                command.text.clone(),
            ),
            ResolutionCue::Text(text) => (
                ResolutionStrategy::Residual,
                fuzzy_find_doc(text, documents),
                text.clone(),
            ),
            ResolutionCue::Empty => (ResolutionStrategy::Empty, None, command.text.clone()),
        };
        let target = target.cloned();

        self.telemetry.record(TelemetryEvent::Resolution {
            strategy,
            matched: target.is_some(),
        });

        let Some(target_document) = target else {
            let alternatives = nearest_alternatives(
                &query,
                documents,
                self.config.max_alternatives,
                self.config.alternative_similarity,
            )
            .into_iter()
            .cloned()
            .collect();
            self.report(
                Outcome::NotFound {
                    command,
                    query,
                    alternatives,
                },
                effects,
            );
            self.settle();
            return;
        };

        self.transition(Phase::Resolved);

        // Overwrite policy: the replaced action is dropped only now that the
        // new one has a target.
        if let Some(previous) = self.state.pending().cloned() {
            effects.push(SideEffect::DisarmConfirmationTimer {
                action_id: previous.id,
            });
            self.state.reduce(StateDelta::PendingCleared);
            self.record_pending(previous.id, PendingEventKind::Replaced);
            self.report(Outcome::PendingReplaced { previous }, effects);
        }

        let action = PendingAction {
            id: Uuid::new_v4(),
            kind,
            target_document,
            query,
            source_command: command,
        };
        let action_id = action.id;

        let schedule = self.scheduler.schedule(action, &self.config);
        let lifecycle = if schedule.next_phase == Phase::Executing {
            PendingEventKind::AutoConfirmed
        } else {
            PendingEventKind::Created
        };
        self.state.reduce(schedule.delta);
        self.record_pending(action_id, lifecycle);
        for effect in schedule.effects {
            if let SideEffect::Report(outcome) = effect {
                self.report(outcome, effects);
            } else {
                effects.push(effect);
            }
        }
        self.transition(schedule.next_phase);
    }

    fn start_execution(&mut self, action: PendingAction, effects: &mut Vec<SideEffect>) {
        info!("Executing {:?} action {}", action.kind, action.id);
        self.state.reduce(StateDelta::ExecutionStarted(action.clone()));
        effects.push(SideEffect::Execute(action));
        self.transition(Phase::Executing);
    }

    fn handle_execution_finished(
        &mut self,
        action_id: ActionId,
        result: Result<ExecutionReport, ExecutionError>,
        effects: &mut Vec<SideEffect>,
    ) {
        // STALE REJECTION: only the in-flight action may settle execution.
        let action = match self.state.in_flight() {
            Some(action) if action.id == action_id => action.clone(),
            _ => {
                info!("Discarded stale execution result for {}", action_id);
                self.telemetry
                    .record(TelemetryEvent::StaleDiscarded { action_id });
                return;
            }
        };

        self.state.reduce(StateDelta::ExecutionSettled);
        let outcome = match result {
            Ok(report) => Outcome::Executed { action, report },
            Err(ExecutionError::PermissionDenied(reason)) => {
                Outcome::PermissionDenied { action, reason }
            }
            Err(error) => {
                warn!("Action {} failed: {}", action_id, error);
                Outcome::ExecutionFailed { action, error }
            }
        };
        self.report(outcome, effects);
        self.settle();
        self.drain_queue(effects);
    }

    fn handle_confirmation_expired(&mut self, action_id: ActionId, effects: &mut Vec<SideEffect>) {
        let action = match self.state.pending() {
            Some(action) if action.id == action_id => action.clone(),
            _ => {
                debug!("Ignoring expiry for settled action {}", action_id);
                self.telemetry
                    .record(TelemetryEvent::StaleDiscarded { action_id });
                return;
            }
        };

        info!("Pending action {} expired", action_id);
        effects.push(SideEffect::DisarmConfirmationTimer { action_id });
        self.state.reduce(StateDelta::PendingCleared);
        self.record_pending(action_id, PendingEventKind::Expired);
        self.report(Outcome::ConfirmationExpired { action }, effects);
        self.settle();
        self.drain_queue(effects);
    }

    /// Feeds queued commands while nothing is pending or running.
    fn drain_queue(&mut self, effects: &mut Vec<SideEffect>) {
        while self.state.phase() == Phase::Idle {
            let Some(command) = self.state.queue().front().cloned() else {
                break;
            };
            self.state.reduce(StateDelta::CommandDequeued);
            self.transition(Phase::Recognized);
            self.dispatch(command, effects);
        }
    }

    /// Returns to whichever resting phase the state implies.
    fn settle(&mut self) {
        let rest = self.state.resting_phase();
        self.transition(rest);
    }

    fn transition(&mut self, to: Phase) {
        let from = self.state.phase();
        if from == to {
            return;
        }
        debug!("Phase {:?} -> {:?}", from, to);
        self.telemetry
            .record(TelemetryEvent::PhaseTransition { from, to });
        self.state.reduce(StateDelta::PhaseChanged(to));
    }

    fn report(&mut self, outcome: Outcome, effects: &mut Vec<SideEffect>) {
        self.telemetry.record(TelemetryEvent::Outcome {
            kind: outcome.kind(),
        });
        effects.push(SideEffect::Report(outcome));
    }

    fn record_pending(&mut self, action_id: ActionId, event: PendingEventKind) {
        self.telemetry
            .record(TelemetryEvent::PendingLifecycle { action_id, event });
    }

    /// Async Driver Loop. Runs until `shutdown` fires; the reactor keeps its
    /// own sender, so a closed input channel alone never ends it.
    pub async fn run<E: DocumentExecutor>(
        &mut self,
        executor: Arc<E>,
        outcomes: mpsc::Sender<Outcome>,
        shutdown: CancellationToken,
    ) {
        info!("Reactor started");
        let mut timers = ConfirmationTimers::new(self.tx_clone.clone());
        let execution_timeout = self.config.execution_timeout();

        loop {
            // Driver: wait for the next event
            let first = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                event = self.receiver.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
            };

            // Driver: drain whatever else is already queued
            let mut events = vec![first];
            while let Ok(event) = self.receiver.try_recv() {
                events.push(event);
            }

            // Core: execute step
            let effects = self.tick_step(events);

            // Driver: execute side effects
            for effect in effects {
                match effect {
                    SideEffect::Report(outcome) => {
                        if outcomes.send(outcome).await.is_err() {
                            warn!("Outcome receiver dropped");
                        }
                    }
                    SideEffect::Execute(action) => {
                        let executor = Arc::clone(&executor);
                        let tx = self.tx_clone.clone();
                        tokio::spawn(async move {
                            let action_id = action.id;
                            let result = match tokio::time::timeout(
                                execution_timeout,
                                executor.execute(&action),
                            )
                            .await
                            {
                                Ok(result) => result,
                                Err(_) => Err(ExecutionError::TimedOut(
                                    execution_timeout.as_millis() as u64,
                                )),
                            };
                            if let Err(e) = tx
                                .send(Event::ExecutionFinished { action_id, result })
                                .await
                            {
                                warn!("Failed to report execution result: {}", e);
                            }
                        });
                    }
                    SideEffect::ArmConfirmationTimer { action_id, after } => {
                        timers.arm(action_id, after);
                    }
                    SideEffect::DisarmConfirmationTimer { action_id } => {
                        timers.disarm(action_id);
                    }
                }
            }
        }

        timers.disarm_all();
        info!("Reactor stopped");
    }
}
