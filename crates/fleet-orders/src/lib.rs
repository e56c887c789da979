//! `fleet-orders`: delivery orders and their registry.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`order`]     | `Order`, `OrderStatus`                                    |
//! | [`registry`]  | `OrderRegistry` (owned store keyed by `OrderId`)          |
//! | [`expiry`]    | `ExpiryQueue` (`BTreeMap<Tick, Vec<OrderId>>`)            |
//! | [`generator`] | `OrderGenerator` (uniform random placement)               |
//! | [`loader`]    | `load_orders_csv`, `load_orders_reader`                   |
//! | [`error`]     | `OrderError`, `OrderResult<T>`                            |
//!
//! # Lifecycle (summary)
//!
//! ```text
//! insert / generate ──► Unassigned ──mark_assigned──► Assigned ──mark_delivered──► Delivered
//!                                                                                     │
//!                                             purge_expired(now ≥ delivered + grace) ◄┘
//! ```
//!
//! Status never regresses.  Robots and the dispatcher hold `OrderId`s and
//! read current state through the registry; once an order is purged or
//! cancelled its id simply stops resolving.

pub mod error;
pub mod expiry;
pub mod generator;
pub mod loader;
pub mod order;
pub mod registry;

#[cfg(test)]
mod tests;

pub use error::{OrderError, OrderResult};
pub use expiry::ExpiryQueue;
pub use generator::OrderGenerator;
pub use loader::{OrderSeed, load_orders_csv, load_orders_reader};
pub use order::{Order, OrderStatus};
pub use registry::{LocationSet, OrderRegistry};
