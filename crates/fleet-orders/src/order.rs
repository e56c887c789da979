//! The order value type.

use std::fmt;

use fleet_core::{Cell, OrderId, Tick};

/// Lifecycle stage of an order.  Transitions only move forward.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrderStatus {
    Unassigned,
    Assigned,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Unassigned => "unassigned",
            OrderStatus::Assigned   => "assigned",
            OrderStatus::Delivered  => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery request.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id:           OrderId,
    pub location:     Cell,
    pub status:       OrderStatus,
    pub created_at:   Tick,
    /// Set exactly once, on the `Assigned → Delivered` transition.
    pub delivered_at: Option<Tick>,
}

impl Order {
    pub fn new(id: OrderId, location: Cell, created_at: Tick) -> Self {
        Self {
            id,
            location,
            status: OrderStatus::Unassigned,
            created_at,
            delivered_at: None,
        }
    }

    /// Ticks since creation.  Zero for orders stamped in the future.
    #[inline]
    pub fn age(&self, now: Tick) -> u64 {
        now.since(self.created_at)
    }

    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }
}
