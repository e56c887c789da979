//! `fleet-core`: foundational types for the `rust_fleet` delivery simulator.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RobotId`, `OrderId`                                  |
//! | [`cell`]        | `Cell` grid coordinate and distance helpers           |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `SimRng` (simulation-level, seedable)                 |
//! | [`speed`]       | `SpeedMode` throttle levels                           |
//! | [`config`]      | `FleetConfig`, `PathStrategy`                         |
//! | [`error`]       | `FleetError`, `FleetResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod speed;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use config::{FleetConfig, PathStrategy};
pub use error::{FleetError, FleetResult};
pub use ids::{OrderId, RobotId};
pub use rng::SimRng;
pub use speed::SpeedMode;
pub use time::{SimClock, Tick};
