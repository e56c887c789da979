//! Candidate ranking.

use fleet_core::{Cell, OrderId, Tick};
use fleet_orders::Order;

/// An unassigned order as seen by one dispatch cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub id:         OrderId,
    pub location:   Cell,
    pub created_at: Tick,
    pub score:      f64,
}

/// `age_weight · age − euclidean(location, depot)`.  Higher is more urgent:
/// old orders and orders close to the depot go first.
#[inline]
pub fn priority_score(order: &Order, depot: Cell, now: Tick, age_weight: f64) -> f64 {
    age_weight * order.age(now) as f64 - order.location.distance(depot)
}

/// Score `orders` and sort them by descending priority.
///
/// The sort is stable, so orders with equal scores keep the order they were
/// supplied in (the registry yields them by ascending id).
pub fn rank_candidates<'a>(
    orders:     impl IntoIterator<Item = &'a Order>,
    depot:      Cell,
    now:        Tick,
    age_weight: f64,
) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = orders
        .into_iter()
        .map(|o| Candidate {
            id:         o.id,
            location:   o.location,
            created_at: o.created_at,
            score:      priority_score(o, depot, now, age_weight),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
