//! Inputs and outputs of one robot movement step.

use fleet_core::{Cell, OrderId, RobotId, Tick};
use fleet_spatial::{GridWorld, PathFinder};

/// Read-only world view handed to [`Robot::step`](crate::Robot::step).
///
/// Shared by every robot in a tick.  All fields are shared references or
/// `Copy`, so one context can be borrowed across rayon workers.
pub struct StepContext<'a, P: PathFinder + ?Sized> {
    pub grid:       &'a GridWorld,
    pub finder:     &'a P,
    /// Dwell length started when a robot arrives home empty.
    pub wait_ticks: u64,
    pub now:        Tick,
}

/// An order completed during a step.  The driver marks it delivered in the
/// registry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Delivery {
    pub robot:   RobotId,
    pub order:   OrderId,
    pub at:      Tick,
    /// Ticks from order creation to delivery.
    pub latency: u64,
}

/// A replanning attempt that found no route.  The robot holds position and
/// retries on its next step.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PathFailure {
    pub robot: RobotId,
    pub from:  Cell,
    pub to:    Cell,
}

/// Everything a step produced that the driver must act on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub deliveries:   Vec<Delivery>,
    pub path_failure: Option<PathFailure>,
    /// `true` on the step a robot arrives home with an empty queue.
    pub docked:       bool,
    /// `true` if the robot changed cell this step.
    pub moved:        bool,
}

impl StepReport {
    /// `true` if the step produced nothing the driver needs to apply.
    pub fn is_quiet(&self) -> bool {
        self.deliveries.is_empty() && self.path_failure.is_none() && !self.docked
    }
}
