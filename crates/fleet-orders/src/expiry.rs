//! `ExpiryQueue`: sparse per-tick removal schedule for delivered orders.
//!
//! A delivered order stays in the registry for a grace period so snapshot
//! consumers can still show it.  Rather than scanning every order each tick
//! for "has my grace period run out?", the registry records the tick at which
//! each delivered order expires and drains only the ticks that have come due.
//!
//! `BTreeMap` keeps the keys ordered, so draining "everything at or before
//! `now`" is a walk from the front that stops at the first future tick.

use std::collections::BTreeMap;

use fleet_core::{OrderId, Tick};

/// Maps expiry ticks to the orders that become removable at that tick.
#[derive(Default, Debug)]
pub struct ExpiryQueue {
    inner: BTreeMap<Tick, Vec<OrderId>>,
    /// Cached entry count for O(1) `len()`.
    total: usize,
}

impl ExpiryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `order` for removal at `tick`.
    pub fn push(&mut self, tick: Tick, order: OrderId) {
        self.inner.entry(tick).or_default().push(order);
        self.total += 1;
    }

    /// Remove and return every order scheduled at or before `now`, earliest
    /// tick first.
    pub fn drain_due(&mut self, now: Tick) -> Vec<OrderId> {
        // Everything strictly after `now` stays.
        let later = match now.0.checked_add(1) {
            Some(next) => self.inner.split_off(&Tick(next)),
            None => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.inner, later);
        let out: Vec<OrderId> = due.into_values().flatten().collect();
        self.total -= out.len();
        out
    }

    /// The earliest tick with at least one queued order.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
