//! Robot task state.

use std::fmt;

use fleet_core::{Cell, OrderId, Tick};

/// Coarse task state of a robot.
///
/// Never stored: [`Robot::state`](crate::Robot::state) derives it from the
/// position, path, queue and dwell timer, so it cannot drift out of sync.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RobotState {
    /// At home with no path, no orders and no dwell.  Only robots in this
    /// state are offered to the dispatcher.
    AtDepotIdle,
    /// Holding at home for the post-return dwell.
    Waiting,
    /// Anything else: travelling, or stalled on an unreachable target.
    EnRoute,
}

impl RobotState {
    pub fn as_str(self) -> &'static str {
        match self {
            RobotState::AtDepotIdle => "idle",
            RobotState::Waiting     => "waiting",
            RobotState::EnRoute     => "en_route",
        }
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a robot remembers about an order it carries.
///
/// A copy of the registry's data taken at assignment, so the robot never
/// needs to read the registry while stepping.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct QueuedOrder {
    pub id:         OrderId,
    pub location:   Cell,
    pub created_at: Tick,
}
