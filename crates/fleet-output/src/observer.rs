//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use fleet_sim::{FinalStats, SimObserver, SimSnapshot, TickSummary};

use crate::row::{RobotSnapshotRow, RobotStatsRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes robot snapshots, tick summaries and final
/// per-robot totals to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, snapshot: &SimSnapshot<'_>) {
        let rows: Vec<RobotSnapshotRow> = snapshot
            .robot_views()
            .map(|v| RobotSnapshotRow::from_view(snapshot.tick, &v))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, stats: &FinalStats) {
        let rows: Vec<RobotStatsRow> = stats.robots.iter().map(RobotStatsRow::from).collect();
        let result = self.writer.write_robot_stats(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
