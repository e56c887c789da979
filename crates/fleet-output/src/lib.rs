//! `fleet-output`: adapters that carry simulation state out of the tick loop.
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`csv`]      | `CsvWriter`: `robot_snapshots.csv`, `tick_summaries.csv`, `robot_stats.csv` |
//! | [`observer`] | `SimOutputObserver<W>`: drives any [`OutputWriter`]            |
//! | [`channel`]  | `FrameChannelObserver`: bounded, never-blocking frame channel  |
//! | [`row`]      | Plain row types shared by writers                               |
//!
//! Both observers implement `fleet_sim::SimObserver` and only read the
//! snapshots they are handed.  Combine them with a tuple observer:
//!
//! ```rust,ignore
//! use fleet_output::{CsvWriter, FrameChannelObserver, SimOutputObserver};
//!
//! let csv = SimOutputObserver::new(CsvWriter::new(Path::new("./output"))?);
//! let (frames, rx) = FrameChannelObserver::bounded(16);
//! let mut obs = (csv, frames);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.0.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod channel;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use channel::FrameChannelObserver;
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{RobotSnapshotRow, RobotStatsRow, TickSummaryRow};
pub use writer::OutputWriter;
