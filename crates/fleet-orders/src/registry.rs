//! Owned order store.
//!
//! `OrderRegistry` is the single owner of every live `Order`.  It is keyed by
//! `OrderId` in a `BTreeMap`, so iteration is always in creation order.  That
//! ordering is what makes dispatch tie-breaking and snapshot output
//! reproducible across runs.

use std::collections::BTreeMap;

use tracing::debug;

use fleet_core::{Cell, OrderId, Tick};
use fleet_spatial::GridWorld;

use crate::{ExpiryQueue, Order, OrderError, OrderResult, OrderStatus};

/// Set of cells occupied by live orders.
#[cfg(feature = "fx-hash")]
pub type LocationSet = rustc_hash::FxHashSet<Cell>;
/// Set of cells occupied by live orders.
#[cfg(not(feature = "fx-hash"))]
pub type LocationSet = std::collections::HashSet<Cell>;

pub struct OrderRegistry {
    orders:      BTreeMap<OrderId, Order>,
    next_id:     OrderId,
    expiry:      ExpiryQueue,
    grace_ticks: u64,
}

impl OrderRegistry {
    /// An empty registry.  Delivered orders are purged `grace_ticks` after
    /// delivery.
    pub fn new(grace_ticks: u64) -> Self {
        Self {
            orders: BTreeMap::new(),
            next_id: OrderId(0),
            expiry: ExpiryQueue::new(),
            grace_ticks,
        }
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Register a new `Unassigned` order at `location`.
    ///
    /// Rejects cells that are out of bounds, blocked, or cut off from the
    /// depot.
    pub fn insert(&mut self, grid: &GridWorld, location: Cell, created_at: Tick) -> OrderResult<OrderId> {
        if !grid.is_passable(location) {
            return Err(OrderError::InvalidLocation(location));
        }
        if !grid.is_reachable_from_depot(location) {
            return Err(OrderError::Unreachable(location));
        }
        let id = self.next_id;
        self.next_id = id.next();
        self.orders.insert(id, Order::new(id, location, created_at));
        Ok(id)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    /// All live orders in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// `Unassigned` orders in id order.
    pub fn unassigned(&self) -> impl Iterator<Item = &Order> {
        self.orders.values().filter(|o| o.status == OrderStatus::Unassigned)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Orders not yet delivered.  This is the figure the congestion guard
    /// compares against the free-cell count.
    pub fn active_count(&self) -> usize {
        self.orders.values().filter(|o| !o.is_delivered()).count()
    }

    pub fn unassigned_count(&self) -> usize {
        self.unassigned().count()
    }

    /// Total orders ever created (the next id to be handed out).
    pub fn created_count(&self) -> u32 {
        self.next_id.0
    }

    /// Cells holding a live order, delivered ones included until purged.
    pub fn occupied_locations(&self) -> LocationSet {
        self.orders.values().map(|o| o.location).collect()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// `Unassigned → Assigned`.
    pub fn mark_assigned(&mut self, id: OrderId) -> OrderResult<()> {
        let order = self.orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;
        expect_status(order, OrderStatus::Unassigned)?;
        order.status = OrderStatus::Assigned;
        Ok(())
    }

    /// `Assigned → Delivered`, stamping the delivery tick and scheduling the
    /// order for removal after the grace period.
    pub fn mark_delivered(&mut self, id: OrderId, at: Tick) -> OrderResult<()> {
        let order = self.orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;
        expect_status(order, OrderStatus::Assigned)?;
        order.status = OrderStatus::Delivered;
        order.delivered_at = Some(at);
        self.expiry.push(at + self.grace_ticks, id);
        Ok(())
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Remove an order regardless of status.  The caller is responsible for
    /// dropping it from any robot queue that still references it.
    pub fn cancel(&mut self, id: OrderId) -> OrderResult<Order> {
        self.orders.remove(&id).ok_or(OrderError::NotFound(id))
    }

    /// Drop every delivered order whose grace period has ended by `now`.
    /// Returns the removed ids.
    pub fn purge_expired(&mut self, now: Tick) -> Vec<OrderId> {
        let mut removed = self.expiry.drain_due(now);
        // Cancelled orders may still have an expiry entry.
        removed.retain(|id| self.orders.remove(id).is_some());
        if !removed.is_empty() {
            debug!(tick = now.0, count = removed.len(), "purged delivered orders");
        }
        removed
    }
}

fn expect_status(order: &Order, expected: OrderStatus) -> OrderResult<()> {
    if order.status == expected {
        Ok(())
    } else {
        Err(OrderError::InvalidState { id: order.id, expected, found: order.status })
    }
}
