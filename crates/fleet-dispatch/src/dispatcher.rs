//! The batch dispatcher.

use tracing::{info, warn};

use fleet_core::{Cell, FleetConfig, OrderId, RobotId, Tick};
use fleet_orders::OrderRegistry;
use fleet_robot::{QueuedOrder, Robot};
use fleet_spatial::{GridWorld, PathFinder};

use crate::{Candidate, DispatchResult, LegTable, best_sequence, form_group, rank_candidates};

/// Tunables read by every cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DispatchParams {
    pub max_orders_per_robot: usize,
    pub group_radius_sq:      i64,
    pub age_weight:           f64,
}

impl DispatchParams {
    pub fn from_config(config: &FleetConfig) -> Self {
        Self {
            max_orders_per_robot: config.max_orders_per_robot,
            group_radius_sq:      config.group_radius_sq,
            age_weight:           config.age_weight,
        }
    }
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self::from_config(&FleetConfig::default())
    }
}

/// Orders committed to one robot in one cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub robot:     RobotId,
    /// Delivery sequence.
    pub orders:    Vec<OrderId>,
    /// Total path edges from the robot through every stop.
    pub total_len: usize,
}

/// Outcome of one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub assignments: Vec<Assignment>,
    /// Orders whose group had no fully routable sequence.  They stay
    /// `Unassigned` and are reconsidered next cycle.
    pub unroutable:  Vec<OrderId>,
}

impl DispatchReport {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.unroutable.is_empty()
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments.iter().map(|a| a.orders.len()).sum()
    }
}

/// Groups unassigned orders onto idle robots.
///
/// # Type parameter
///
/// `P` is the path search used for every leg.  The dispatcher owns it; the
/// tick driver borrows it back through [`finder`](Self::finder) so robots
/// replan with the same strategy.
pub struct Dispatcher<P: PathFinder> {
    finder: P,
    params: DispatchParams,
}

impl<P: PathFinder> Dispatcher<P> {
    pub fn new(finder: P, params: DispatchParams) -> Self {
        Self { finder, params }
    }

    pub fn finder(&self) -> &P {
        &self.finder
    }

    pub fn params(&self) -> &DispatchParams {
        &self.params
    }

    /// Run one assignment cycle.
    ///
    /// With no idle robot or no unassigned order this returns an empty
    /// report and touches nothing.
    ///
    /// # Errors
    ///
    /// Only on an invariant violation while committing (a robot over
    /// capacity, or an order that is no longer `Unassigned`).  Either means
    /// engine state is already inconsistent; callers should stop the run.
    pub fn dispatch(
        &self,
        grid:   &GridWorld,
        now:    Tick,
        robots: &mut [Robot],
        orders: &mut OrderRegistry,
    ) -> DispatchResult<DispatchReport> {
        let mut report = DispatchReport::default();

        let idle: Vec<usize> = robots
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_idle())
            .map(|(i, _)| i)
            .collect();
        if idle.is_empty() || orders.unassigned_count() == 0 {
            return Ok(report);
        }

        let ranked = rank_candidates(orders.unassigned(), grid.depot(), now, self.params.age_weight);
        let mut claimed = vec![false; ranked.len()];

        for i in idle {
            let robot = &mut robots[i];
            let limit = self.params.max_orders_per_robot.min(robot.remaining_capacity());
            let group = form_group(&ranked, &mut claimed, self.params.group_radius_sq, limit);
            if group.is_empty() {
                break;
            }

            let stops: Vec<Cell> = group.iter().map(|&g| ranked[g].location).collect();
            let legs = LegTable::build(grid, &self.finder, robot.position(), &stops);
            let Some(plan) = best_sequence(&legs) else {
                let ids: Vec<OrderId> = group.iter().map(|&g| ranked[g].id).collect();
                warn!(
                    robot = %robot.id(),
                    orders = ?ids,
                    tick = now.0,
                    "no routable sequence for group; left unassigned"
                );
                report.unroutable.extend(ids);
                continue;
            };

            let assignment = self.commit(robot, orders, &ranked, &group, &legs, &plan.order, plan.total_len)?;
            info!(
                robot = %assignment.robot,
                orders = ?assignment.orders,
                total_len = assignment.total_len,
                tick = now.0,
                "assigned orders"
            );
            report.assignments.push(assignment);
        }

        Ok(report)
    }

    /// Queue the winning sequence on `robot` and mark each order assigned.
    #[allow(clippy::too_many_arguments)]
    fn commit(
        &self,
        robot:     &mut Robot,
        orders:    &mut OrderRegistry,
        ranked:    &[Candidate],
        group:     &[usize],
        legs:      &LegTable,
        sequence:  &[usize],
        total_len: usize,
    ) -> DispatchResult<Assignment> {
        let mut at = 0;
        let mut committed = Vec::with_capacity(sequence.len());
        for &stop in sequence {
            let candidate = &ranked[group[stop]];
            // Every leg of a winning sequence is routable.
            let path = legs.leg(at, stop + 1).map(Vec::as_slice).unwrap_or_default();
            orders.mark_assigned(candidate.id)?;
            robot.add_order(path, QueuedOrder {
                id:         candidate.id,
                location:   candidate.location,
                created_at: candidate.created_at,
            })?;
            committed.push(candidate.id);
            at = stop + 1;
        }
        Ok(Assignment { robot: robot.id(), orders: committed, total_len })
    }
}
