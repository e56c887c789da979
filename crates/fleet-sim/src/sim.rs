//! The `Sim` struct and its tick loop.

use tracing::{debug, info, warn};

use fleet_core::{Cell, FleetConfig, OrderId, SimClock, SimRng, Tick};
use fleet_dispatch::Dispatcher;
use fleet_orders::{Order, OrderGenerator, OrderRegistry};
use fleet_robot::{Robot, StepContext, StepReport};
use fleet_spatial::{GridWorld, PathFinder};

use crate::{FinalStats, RobotStats, SimObserver, SimResult, SimSnapshot, StopHandle, TickSummary};

/// Counters that outlive the registry's purge of delivered orders.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct RunTotals {
    pub delivered:        u64,
    pub congestion_skips: u64,
    pub path_failures:    u64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P>` owns all simulation state and drives the tick loop.  With
/// generation period `G`:
///
/// 1. **Purge**: delivered orders past their grace period leave the registry.
/// 2. **Generate** (`tick % G == 0`): one random order, unless the congestion
///    guard trips.
/// 3. **Dispatch** (`tick % G == 1`): one batch assignment cycle.
/// 4. **Step** (optionally parallel with the `parallel` feature): every robot
///    advances one step and returns a [`StepReport`].
/// 5. **Apply** (sequential, ascending `RobotId`): deliveries are stamped in
///    the registry; path failures are reported.
/// 6. **Snapshot** at the configured interval.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathFinder> {
    /// Validated configuration.
    pub config: FleetConfig,

    /// The single authoritative tick counter.
    pub clock: SimClock,

    /// Obstacle grid, immutable for the whole run.
    pub grid: GridWorld,

    /// The fleet, indexed by `RobotId`.
    pub robots: Vec<Robot>,

    /// Every live order.  Robots and the dispatcher refer to orders by id.
    pub orders: OrderRegistry,

    pub(crate) generator:  OrderGenerator,
    pub(crate) rng:        SimRng,
    pub(crate) dispatcher: Dispatcher<P>,
    pub(crate) stop:       StopHandle,
    pub(crate) totals:     RunTotals,
}

impl<P: PathFinder> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a stop is requested or `config.max_ticks` ticks have
    /// elapsed, then report final statistics.
    ///
    /// A stop request never interrupts a tick: the tick in progress completes
    /// first.  With `max_ticks = None` and no stop request this never returns.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<FinalStats> {
        loop {
            if self.stop.is_stop_requested() {
                info!(tick = self.clock.current_tick.0, "stop requested");
                break;
            }
            if self.config.max_ticks.is_some_and(|max| self.clock.elapsed() >= max) {
                break;
            }
            self.tick(observer)?;
        }
        let stats = self.final_stats();
        info!(
            ticks = stats.elapsed_ticks,
            delivered = stats.orders_delivered,
            outstanding = stats.orders_outstanding,
            "simulation finished"
        );
        observer.on_sim_end(&stats);
        Ok(stats)
    }

    /// Run exactly `n` ticks from the current position, ignoring
    /// `max_ticks` and stop requests.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// A handle that ends [`run`](Self::run) from outside the tick loop.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Register an order at `location`, created now.
    ///
    /// The next dispatch cycle considers it like any generated order.  Cells
    /// that are blocked or cut off from the depot are rejected.
    pub fn seed_order(&mut self, location: Cell) -> SimResult<OrderId> {
        let now = self.clock.current_tick;
        Ok(self.orders.insert(&self.grid, location, now)?)
    }

    /// Remove an order from the registry and from whichever robot carries it.
    pub fn cancel_order(&mut self, id: OrderId) -> SimResult<Order> {
        let order = self.orders.cancel(id)?;
        for robot in &mut self.robots {
            if robot.drop_order(id) {
                debug!(robot = %robot.id(), order = %id, "cancelled order dropped from queue");
            }
        }
        Ok(order)
    }

    /// Borrowed view of the current state.
    pub fn snapshot(&self) -> SimSnapshot<'_> {
        SimSnapshot {
            tick:   self.clock.current_tick,
            grid:   &self.grid,
            robots: &self.robots,
            orders: &self.orders,
        }
    }

    pub fn final_stats(&self) -> FinalStats {
        FinalStats {
            elapsed_ticks:      self.clock.elapsed(),
            orders_created:     self.orders.created_count(),
            orders_delivered:   self.totals.delivered,
            orders_outstanding: self.orders.active_count(),
            congestion_skips:   self.totals.congestion_skips,
            path_failures:      self.totals.path_failures,
            robots:             self.robots.iter().map(RobotStats::from).collect(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<P> {
        &self.dispatcher
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let mut summary = self.process_tick(now, observer)?;
        summary.active_orders = self.orders.active_count();
        summary.idle_robots = self.robots.iter().filter(|r| r.is_idle()).count();

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(&self.snapshot());
        }
        observer.on_tick_end(&summary);

        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickSummary> {
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };
        let period = self.config.generation_period;

        // ── Phase 1: purge expired deliveries ─────────────────────────────
        summary.purged = self.orders.purge_expired(now).len();

        // ── Phase 2: order generation under the congestion guard ──────────
        if self.config.auto_generate && now.is_phase(period, 0) {
            match self.generate_order(now, observer) {
                Generation::Created => summary.orders_created = 1,
                Generation::Congested => summary.congested = true,
                Generation::Exhausted => {}
            }
        }

        // ── Phase 3: dispatch ─────────────────────────────────────────────
        //
        // The dispatcher holds `&mut` to both the robots and the registry for
        // the whole cycle.
        if now.is_phase(period, 1) {
            let report = self.dispatcher.dispatch(&self.grid, now, &mut self.robots, &mut self.orders)?;
            for assignment in &report.assignments {
                observer.on_assignment(now, assignment);
            }
            summary.orders_assigned = report.assigned_count();
        }

        // ── Phase 4: robot steps (produce) ────────────────────────────────
        let reports = self.step_robots(now);

        // ── Phase 5: apply reports (consume) ──────────────────────────────
        //
        // Reports arrive in robot order, so registry updates are identical
        // whether or not the step phase ran in parallel.
        for report in reports {
            if report.moved {
                summary.robots_moved += 1;
            }
            for delivery in &report.deliveries {
                self.orders.mark_delivered(delivery.order, delivery.at)?;
                self.totals.delivered += 1;
                summary.deliveries += 1;
                observer.on_delivery(delivery);
            }
            if let Some(failure) = &report.path_failure {
                warn!(
                    robot = %failure.robot,
                    from = %failure.from,
                    to = %failure.to,
                    tick = now.0,
                    "no path to target; retrying next step"
                );
                self.totals.path_failures += 1;
                summary.path_failures += 1;
                observer.on_path_not_found(now, failure);
            }
        }

        Ok(summary)
    }

    fn generate_order<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> Generation {
        let active = self.orders.active_count();
        let limit = self.config.congestion_limit(self.grid.free_cell_count());
        if active >= limit {
            warn!(tick = now.0, active, limit, "congestion: order generation skipped");
            self.totals.congestion_skips += 1;
            observer.on_congestion(now, active, limit);
            return Generation::Congested;
        }

        let Some(id) = self.generator.generate(&self.grid, &mut self.orders, &mut self.rng, now) else {
            warn!(tick = now.0, "no free cell for a new order");
            return Generation::Exhausted;
        };
        if let Some(order) = self.orders.get(id) {
            debug!(order = %id, cell = %order.location, tick = now.0, "order created");
            observer.on_order_created(order);
        }
        Generation::Created
    }

    /// Advance every robot one step.
    ///
    /// With the `parallel` Cargo feature the steps run on Rayon's thread
    /// pool.  Each robot only mutates itself; everything else is read through
    /// the shared [`StepContext`].
    fn step_robots(&mut self, now: Tick) -> Vec<StepReport> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx = StepContext {
            grid:       &self.grid,
            finder:     self.dispatcher.finder(),
            wait_ticks: self.config.wait_ticks,
            now,
        };
        let robots = &mut self.robots;

        #[cfg(not(feature = "parallel"))]
        {
            robots.iter_mut().map(|r| r.step(&ctx)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            robots.par_iter_mut().map(|r| r.step(&ctx)).collect()
        }
    }
}

/// Outcome of a generation phase.
enum Generation {
    Created,
    Congested,
    /// No free candidate cell was left.
    Exhausted,
}
