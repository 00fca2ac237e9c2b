//! Interpreter telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside decision logic (Reactor, Scheduler, Interpreter).
//!
//! # PRIVACY INVARIANT
//! Events carry ids, enums and counts only. No utterance text, no document names.

pub mod event;
pub mod metrics;
pub mod recorder;
