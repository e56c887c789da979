//! Read-only views of simulation state for external consumers.

use fleet_core::{Cell, OrderId, RobotId, SpeedMode, Tick};
use fleet_orders::{Order, OrderRegistry, OrderStatus};
use fleet_robot::{Robot, RobotState};
use fleet_spatial::GridWorld;

// ── Per-entity views ──────────────────────────────────────────────────────────

/// One robot as seen by a renderer or stats collector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RobotView {
    pub id:            RobotId,
    pub position:      Cell,
    pub busy:          bool,
    pub state:         RobotState,
    pub speed_mode:    SpeedMode,
    pub queued:        usize,
    pub deliveries:    u32,
    pub total_latency: u64,
}

impl From<&Robot> for RobotView {
    fn from(r: &Robot) -> Self {
        Self {
            id:            r.id(),
            position:      r.position(),
            busy:          r.is_busy(),
            state:         r.state(),
            speed_mode:    r.speed_mode(),
            queued:        r.queue().len(),
            deliveries:    r.deliveries(),
            total_latency: r.total_latency(),
        }
    }
}

/// One live order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OrderView {
    pub id:           OrderId,
    pub location:     Cell,
    pub status:       OrderStatus,
    pub created_at:   Tick,
    pub delivered_at: Option<Tick>,
}

impl From<&Order> for OrderView {
    fn from(o: &Order) -> Self {
        Self {
            id:           o.id,
            location:     o.location,
            status:       o.status,
            created_at:   o.created_at,
            delivered_at: o.delivered_at,
        }
    }
}

// ── SimSnapshot ───────────────────────────────────────────────────────────────

/// Borrowed view of the whole simulation at the end of a tick.
///
/// Handed to [`SimObserver::on_snapshot`](crate::SimObserver::on_snapshot).
/// Nothing here can mutate engine state; consumers that need to keep the data
/// past the callback call [`to_frame`](Self::to_frame).
#[derive(Copy, Clone)]
pub struct SimSnapshot<'a> {
    pub tick:   Tick,
    pub grid:   &'a GridWorld,
    pub robots: &'a [Robot],
    pub orders: &'a OrderRegistry,
}

impl<'a> SimSnapshot<'a> {
    pub fn robot_views(&self) -> impl Iterator<Item = RobotView> + 'a {
        self.robots.iter().map(RobotView::from)
    }

    pub fn order_views(&self) -> impl Iterator<Item = OrderView> + 'a {
        self.orders.iter().map(OrderView::from)
    }

    /// Copy everything into an owned [`SnapshotFrame`].
    pub fn to_frame(&self) -> SnapshotFrame {
        SnapshotFrame {
            tick:      self.tick,
            grid_size: self.grid.size(),
            depot:     self.grid.depot(),
            obstacles: self.grid.obstacles().collect(),
            robots:    self.robot_views().collect(),
            orders:    self.order_views().collect(),
        }
    }
}

/// Owned copy of a [`SimSnapshot`], safe to send to another thread.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotFrame {
    pub tick:      Tick,
    pub grid_size: u32,
    pub depot:     Cell,
    pub obstacles: Vec<Cell>,
    pub robots:    Vec<RobotView>,
    pub orders:    Vec<OrderView>,
}

impl SnapshotFrame {
    /// Cumulative deliveries across the fleet.
    pub fn total_deliveries(&self) -> u64 {
        self.robots.iter().map(|r| u64::from(r.deliveries)).sum()
    }
}
