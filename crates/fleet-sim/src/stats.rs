//! Per-tick and end-of-run aggregates.

use fleet_core::{RobotId, Tick};
use fleet_robot::Robot;

/// What happened during one tick.  Passed to
/// [`SimObserver::on_tick_end`](crate::SimObserver::on_tick_end).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:            Tick,
    pub orders_created:  usize,
    pub orders_assigned: usize,
    pub deliveries:      usize,
    pub path_failures:   usize,
    /// Generation was due but skipped by the congestion guard.
    pub congested:       bool,
    pub purged:          usize,
    /// Non-delivered orders at the end of the tick.
    pub active_orders:   usize,
    pub idle_robots:     usize,
    pub robots_moved:    usize,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RobotStats {
    pub id:              RobotId,
    pub deliveries:      u32,
    pub total_latency:   u64,
    pub average_latency: f64,
}

impl From<&Robot> for RobotStats {
    fn from(r: &Robot) -> Self {
        Self {
            id:              r.id(),
            deliveries:      r.deliveries(),
            total_latency:   r.total_latency(),
            average_latency: r.average_latency(),
        }
    }
}

/// Aggregates exposed when a run ends.
#[derive(Clone, Debug, PartialEq)]
pub struct FinalStats {
    /// Ticks completed since tick 0.
    pub elapsed_ticks:      u64,
    pub orders_created:     u32,
    pub orders_delivered:   u64,
    /// Orders still waiting for delivery.
    pub orders_outstanding: usize,
    pub congestion_skips:   u64,
    pub path_failures:      u64,
    pub robots:             Vec<RobotStats>,
}

impl FinalStats {
    /// Mean latency over every delivery in the fleet, `0.0` if none.
    pub fn average_latency(&self) -> f64 {
        let deliveries: u64 = self.robots.iter().map(|r| u64::from(r.deliveries)).sum();
        if deliveries == 0 {
            return 0.0;
        }
        let latency: u64 = self.robots.iter().map(|r| r.total_latency).sum();
        latency as f64 / deliveries as f64
    }
}
