//! Plain data row types written by output backends.

use fleet_core::Tick;
use fleet_sim::{RobotStats, RobotView, TickSummary};

/// One robot's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotSnapshotRow {
    pub robot_id:   u32,
    pub tick:       u64,
    pub row:        i32,
    pub col:        i32,
    /// `idle`, `waiting` or `en_route`.
    pub state:      &'static str,
    /// `cautious`, `normal` or `fast`.
    pub speed_mode: &'static str,
    pub busy:       bool,
    pub queued:     u32,
    pub deliveries: u32,
}

impl RobotSnapshotRow {
    pub fn from_view(tick: Tick, view: &RobotView) -> Self {
        Self {
            robot_id:   view.id.0,
            tick:       tick.0,
            row:        view.position.row,
            col:        view.position.col,
            state:      view.state.as_str(),
            speed_mode: view.speed_mode.as_str(),
            busy:       view.busy,
            queued:     view.queued as u32,
            deliveries: view.deliveries,
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:            u64,
    pub orders_created:  u64,
    pub orders_assigned: u64,
    pub deliveries:      u64,
    pub path_failures:   u64,
    pub congested:       bool,
    pub active_orders:   u64,
    pub idle_robots:     u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:            s.tick.0,
            orders_created:  s.orders_created as u64,
            orders_assigned: s.orders_assigned as u64,
            deliveries:      s.deliveries as u64,
            path_failures:   s.path_failures as u64,
            congested:       s.congested,
            active_orders:   s.active_orders as u64,
            idle_robots:     s.idle_robots as u64,
        }
    }
}

/// End-of-run totals for one robot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotStatsRow {
    pub robot_id:        u32,
    pub deliveries:      u32,
    pub total_latency:   u64,
    pub average_latency: f64,
}

impl From<&RobotStats> for RobotStatsRow {
    fn from(s: &RobotStats) -> Self {
        Self {
            robot_id:        s.id.0,
            deliveries:      s.deliveries,
            total_latency:   s.total_latency,
            average_latency: s.average_latency,
        }
    }
}
