//! The `Robot` agent.

use std::collections::VecDeque;

use tracing::debug;

use fleet_core::{Cell, OrderId, RobotId, SpeedMode};
use fleet_core::speed::CLEARANCE_WINDOW;
use fleet_spatial::PathFinder;

use crate::{
    Delivery, PathFailure, QueuedOrder, RobotError, RobotResult, RobotState, StepContext,
    StepReport,
};

/// A delivery robot.
///
/// All mutation goes through [`add_order`](Self::add_order),
/// [`drop_order`](Self::drop_order) and [`step`](Self::step); everything else
/// is a read-only accessor.
#[derive(Clone, Debug)]
pub struct Robot {
    id:            RobotId,
    /// The depot this robot returns to.
    home:          Cell,
    position:      Cell,
    /// Cells still to traverse, current cell excluded.
    path:          VecDeque<Cell>,
    queue:         VecDeque<QueuedOrder>,
    capacity:      usize,
    /// Remaining dwell ticks; `Some` exactly while waiting at home.
    dwell:         Option<u64>,
    move_counter:  u32,
    speed:         SpeedMode,
    deliveries:    u32,
    total_latency: u64,
}

impl Robot {
    /// A robot parked idle at `home`.  No dwell is pending, so it is
    /// dispatchable immediately.
    pub fn new(id: RobotId, home: Cell, capacity: usize) -> Self {
        Self {
            id,
            home,
            position: home,
            path: VecDeque::new(),
            queue: VecDeque::with_capacity(capacity),
            capacity,
            dwell: None,
            move_counter: 0,
            speed: SpeedMode::default(),
            deliveries: 0,
            total_latency: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn home(&self) -> Cell {
        self.home
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Remaining path, next cell first.
    pub fn path(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.path.iter()
    }

    /// Queued orders in delivery sequence.
    pub fn queue(&self) -> impl ExactSizeIterator<Item = &QueuedOrder> {
        self.queue.iter()
    }

    pub fn queued_ids(&self) -> Vec<OrderId> {
        self.queue.iter().map(|q| q.id).collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.queue.len())
    }

    /// Throttle level for the cell the robot stood on at its last step.
    pub fn speed_mode(&self) -> SpeedMode {
        self.speed
    }

    pub fn dwell_remaining(&self) -> Option<u64> {
        self.dwell
    }

    pub fn deliveries(&self) -> u32 {
        self.deliveries
    }

    /// Sum of creation-to-delivery ticks over all completed orders.
    pub fn total_latency(&self) -> u64 {
        self.total_latency
    }

    /// Mean delivery latency in ticks; `0.0` before the first delivery.
    pub fn average_latency(&self) -> f64 {
        if self.deliveries == 0 {
            0.0
        } else {
            self.total_latency as f64 / self.deliveries as f64
        }
    }

    /// `true` while the robot has queued orders or path left to walk.
    #[inline]
    pub fn is_busy(&self) -> bool {
        !self.queue.is_empty() || !self.path.is_empty()
    }

    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.dwell.is_some()
    }

    pub fn state(&self) -> RobotState {
        if self.is_waiting() {
            RobotState::Waiting
        } else if self.position == self.home && !self.is_busy() {
            RobotState::AtDepotIdle
        } else {
            RobotState::EnRoute
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state() == RobotState::AtDepotIdle
    }

    // ── Task list ─────────────────────────────────────────────────────────

    /// Queue `order`.  If the robot has no active path, `path` (which must
    /// start at the robot's cell) becomes its route, minus the first cell.
    ///
    /// Capacity is the caller's responsibility; exceeding it is reported as
    /// [`RobotError::CapacityExceeded`] and nothing changes.
    pub fn add_order(&mut self, path: &[Cell], order: QueuedOrder) -> RobotResult<()> {
        if self.queue.len() >= self.capacity {
            return Err(RobotError::CapacityExceeded {
                robot:    self.id,
                order:    order.id,
                capacity: self.capacity,
            });
        }
        if self.queue.iter().any(|q| q.id == order.id) {
            return Err(RobotError::DuplicateOrder { robot: self.id, order: order.id });
        }
        self.queue.push_back(order);
        if self.path.is_empty() {
            debug_assert!(
                path.first().is_none_or(|&c| c == self.position),
                "path for {} must start at {}",
                self.id,
                self.position
            );
            self.path.extend(path.iter().skip(1).copied());
        }
        // Queued work cancels any pending dwell.
        self.dwell = None;
        Ok(())
    }

    /// Forget a queued order, e.g. after it was cancelled externally.
    ///
    /// If it was the current target the path is discarded so the next step
    /// replans toward the new front of the queue (or home).  Returns `false`
    /// if the robot did not carry the order.
    pub fn drop_order(&mut self, order: OrderId) -> bool {
        let Some(pos) = self.queue.iter().position(|q| q.id == order) else {
            return false;
        };
        self.queue.remove(pos);
        if pos == 0 {
            self.path.clear();
            self.move_counter = 0;
        }
        true
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Advance one tick.
    pub fn step<P: PathFinder + ?Sized>(&mut self, ctx: &StepContext<'_, P>) -> StepReport {
        let mut report = StepReport::default();
        let clearance = ctx.grid.nearest_obstacle_distance(self.position, CLEARANCE_WINDOW);
        self.speed = SpeedMode::from_clearance(clearance);

        if let Some(remaining) = self.dwell {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                self.dwell = None;
                debug!(robot = %self.id, tick = ctx.now.0, "dwell finished");
            } else {
                self.dwell = Some(remaining);
            }
            return report;
        }

        if self.position == self.home && !self.is_busy() {
            return report;
        }

        if self.path.is_empty() {
            // Stalled or just handed a zero-length leg: settle in place.
            self.settle(ctx, &mut report);
            if self.path.is_empty() {
                return report;
            }
        }

        self.move_counter += 1;
        if self.move_counter < self.speed.ticks_per_move() {
            return report;
        }
        self.move_counter = 0;

        if let Some(next) = self.path.pop_front() {
            self.position = next;
            report.moved = true;
        }
        if self.path.is_empty() {
            self.settle(ctx, &mut report);
        }
        report
    }

    /// Pop every order at the front of the queue located at the current cell.
    fn complete_orders_here<P: PathFinder + ?Sized>(
        &mut self,
        ctx:    &StepContext<'_, P>,
        report: &mut StepReport,
    ) {
        while self.queue.front().is_some_and(|q| q.location == self.position) {
            let Some(done) = self.queue.pop_front() else { break };
            let latency = ctx.now.since(done.created_at);
            self.deliveries += 1;
            self.total_latency += latency;
            debug!(robot = %self.id, order = %done.id, latency, "delivered");
            report.deliveries.push(Delivery {
                robot: self.id,
                order: done.id,
                at: ctx.now,
                latency,
            });
        }
    }

    /// End-of-path handling: deliver, then plan to the next stop or home.
    fn settle<P: PathFinder + ?Sized>(&mut self, ctx: &StepContext<'_, P>, report: &mut StepReport) {
        self.complete_orders_here(ctx, report);

        let target = self.queue.front().map_or(self.home, |q| q.location);
        if target == self.position {
            // Queue empty and home.
            self.move_counter = 0;
            report.docked = true;
            if ctx.wait_ticks > 0 {
                self.dwell = Some(ctx.wait_ticks);
            }
            debug!(robot = %self.id, tick = ctx.now.0, "docked");
            return;
        }

        match ctx.finder.find_path(ctx.grid, self.position, target) {
            Some(path) => self.path.extend(path.into_iter().skip(1)),
            None => {
                report.path_failure = Some(PathFailure {
                    robot: self.id,
                    from:  self.position,
                    to:    target,
                });
            }
        }
    }
}
