//! `fleet-robot`: per-robot task state, movement, and delivery tracking.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                           |
//! |------------|--------------------------------------------------------------------|
//! | [`state`]  | `RobotState` (derived), `QueuedOrder`                              |
//! | [`robot`]  | `Robot`: position, path, order queue, dwell timer, running stats  |
//! | [`step`]   | `StepContext` (read-only inputs), `StepReport`, `Delivery`         |
//! | [`error`]  | `RobotError`, `RobotResult<T>`                                     |
//!
//! # Movement model (one cell per qualifying tick)
//!
//! 1. The dispatcher calls [`Robot::add_order`] with a precomputed path; the
//!    first call on an idle robot installs that path.
//! 2. Every tick the driver calls [`Robot::step`].  A dwelling robot only
//!    counts down.  Otherwise the robot classifies its clearance into a
//!    [`SpeedMode`](fleet_core::SpeedMode), bumps its throttle counter and
//!    consumes one path cell once the counter reaches the mode's period.
//! 3. When the path runs out the robot *settles*: it completes every queued
//!    order at its cell, then plans to the next order or home.  A robot that
//!    reaches home with nothing queued starts its dwell.
//!
//! `step` never touches the order registry.  Completions come back in the
//! [`StepReport`] and the driver applies them afterwards, which is what lets
//! the driver step robots in parallel.

pub mod error;
pub mod robot;
pub mod state;
pub mod step;

#[cfg(test)]
mod tests;

pub use error::{RobotError, RobotResult};
pub use robot::Robot;
pub use state::{QueuedOrder, RobotState};
pub use step::{Delivery, PathFailure, StepContext, StepReport};
