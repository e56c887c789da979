//! Simulation observer trait for diagnostics and data collection.

use fleet_core::Tick;
use fleet_dispatch::Assignment;
use fleet_orders::Order;
use fleet_robot::{Delivery, PathFailure};

use crate::{FinalStats, SimSnapshot, TickSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Hooks run on the tick loop's thread and
/// only ever see shared references, so an observer cannot change the outcome
/// of a run.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Deliveries(u64);
///
/// impl SimObserver for Deliveries {
///     fn on_delivery(&mut self, _d: &Delivery) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after the snapshot (if any).
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`).
    fn on_snapshot(&mut self, _snapshot: &SimSnapshot<'_>) {}

    /// A generated order entered the registry.
    fn on_order_created(&mut self, _order: &Order) {}

    /// The dispatcher committed a group to a robot.
    fn on_assignment(&mut self, _tick: Tick, _assignment: &Assignment) {}

    /// A robot completed an order.
    fn on_delivery(&mut self, _delivery: &Delivery) {}

    /// A robot could not route to its next target.  It retries next step.
    fn on_path_not_found(&mut self, _tick: Tick, _failure: &PathFailure) {}

    /// Generation was skipped because `active` orders reached `limit`.
    fn on_congestion(&mut self, _tick: Tick, _active: usize, _limit: usize) {}

    /// Called once when [`Sim::run`][crate::Sim::run] returns.
    fn on_sim_end(&mut self, _stats: &FinalStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Forward every hook to both observers, `A` first.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.0.on_tick_end(summary);
        self.1.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, snapshot: &SimSnapshot<'_>) {
        self.0.on_snapshot(snapshot);
        self.1.on_snapshot(snapshot);
    }

    fn on_order_created(&mut self, order: &Order) {
        self.0.on_order_created(order);
        self.1.on_order_created(order);
    }

    fn on_assignment(&mut self, tick: Tick, assignment: &Assignment) {
        self.0.on_assignment(tick, assignment);
        self.1.on_assignment(tick, assignment);
    }

    fn on_delivery(&mut self, delivery: &Delivery) {
        self.0.on_delivery(delivery);
        self.1.on_delivery(delivery);
    }

    fn on_path_not_found(&mut self, tick: Tick, failure: &PathFailure) {
        self.0.on_path_not_found(tick, failure);
        self.1.on_path_not_found(tick, failure);
    }

    fn on_congestion(&mut self, tick: Tick, active: usize, limit: usize) {
        self.0.on_congestion(tick, active, limit);
        self.1.on_congestion(tick, active, limit);
    }

    fn on_sim_end(&mut self, stats: &FinalStats) {
        self.0.on_sim_end(stats);
        self.1.on_sim_end(stats);
    }
}
