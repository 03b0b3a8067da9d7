//! Application layer containing the scheduling logic and its orchestration.
//!
//! `engine` holds the pure projection arithmetic, `state` the tracker's state
//! machine built on top of it, and `tracker` the controller that drives the
//! state machine and persists every change through a `ScheduleStore`.

pub mod engine;
pub mod state;
pub mod tracker;
