//! Frame scheduling.
//!
//! Decides when a frame must be drawn and serializes draw/resize calls against
//! the single graphics context. Pure state machine: no engine or platform
//! calls happen here, so every transition is testable without an event loop.

mod frame;

pub use frame::{FramePlan, FrameScheduler, Schedule, SchedulerState, SkipReason};
