//! Command/confirmation state machine.
//!
//! `Reactor::tick_step` is pure: events in, `SideEffect`s out. The async
//! driver (`Reactor::run`) owns every task, timer and channel.

pub mod cancel;
pub mod event;
pub mod executor;
pub mod outcome;
pub mod reactor;
pub mod scheduler;
pub mod state;
pub mod telemetry;
