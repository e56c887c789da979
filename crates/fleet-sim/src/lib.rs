//! `fleet-sim`: tick driver for the rust_fleet delivery simulator.
//!
//! # Tick loop
//!
//! ```text
//! loop (until stop requested or max_ticks):
//!   ① Purge    : delivered orders past their grace period are dropped.
//!   ② Generate : tick % G == 0: one random order, unless active orders
//!                 ≥ ceil(free_cells · congestion_ratio) (warn + on_congestion).
//!   ③ Dispatch : tick % G == 1: Dispatcher::dispatch over idle robots.
//!   ④ Step     : Robot::step for every robot
//!                 (parallel with the `parallel` feature).
//!   ⑤ Apply    : for each StepReport in ascending RobotId order:
//!                   Delivery     → OrderRegistry::mark_delivered
//!                   PathFailure  → warn + on_path_not_found
//!   ⑥ Snapshot : every snapshot_interval_ticks.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the robot step phase on Rayon's thread pool.      |
//! | `fx-hash`  | FxHash for the occupied-location set.                  |
//! | `serde`    | Serde derives on configuration and core types.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_core::FleetConfig;
//! use fleet_sim::{NoopObserver, SimBuilder};
//!
//! let config = FleetConfig { max_ticks: Some(500), ..FleetConfig::default() };
//! let mut sim = SimBuilder::new(config).build()?;
//! let stats = sim.run(&mut NoopObserver)?;
//! println!("{} delivered", stats.orders_delivered);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;
pub mod stats;
pub mod stop;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{OrderView, RobotView, SimSnapshot, SnapshotFrame};
pub use stats::{FinalStats, RobotStats, TickSummary};
pub use stop::StopHandle;
