//! `fleet-dispatch`: batch assignment of unassigned orders to idle robots.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`priority`]   | `Candidate`, `priority_score`, `rank_candidates`              |
//! | [`group`]      | `form_group`: seed plus radius-bounded greedy fill           |
//! | [`sequence`]   | `LegTable`, `best_sequence`: exhaustive permutation search   |
//! | [`dispatcher`] | `Dispatcher<P>`, `DispatchParams`, `DispatchReport`           |
//! | [`error`]      | `DispatchError`, `DispatchResult<T>`                          |
//!
//! # One cycle
//!
//! ```text
//! rank unassigned orders   score = age_weight·age − dist(order, depot), descending
//! for each idle robot (id order):
//!     seed  = best unclaimed candidate
//!     group = seed + unclaimed candidates within group_radius_sq of seed (≤ capacity)
//!     plan  = cheapest permutation of the group by total path edges
//!     commit plan (mark_assigned + add_order), or report the group unroutable
//! ```
//!
//! Planning only reads the grid and the registry; commit is the only
//! mutation, and it happens one robot at a time.  The dispatcher takes
//! `&mut` to both the robots and the registry for the whole cycle, so no other
//! code can claim an order mid-pass.

pub mod dispatcher;
pub mod error;
pub mod group;
pub mod priority;
pub mod sequence;


pub use dispatcher::{Assignment, DispatchParams, DispatchReport, Dispatcher};
pub use error::{DispatchError, DispatchResult};
pub use group::form_group;
pub use priority::{Candidate, priority_score, rank_candidates};
pub use sequence::{LegTable, Sequence, best_sequence};
