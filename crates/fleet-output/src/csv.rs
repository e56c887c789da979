//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `robot_snapshots.csv`
//! - `tick_summaries.csv`
//! - `robot_stats.csv` (written once, when the run ends)

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RobotSnapshotRow, RobotStatsRow, TickSummaryRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    stats:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("robot_snapshots.csv"))?;
        snapshots.write_record([
            "robot_id", "tick", "row", "col", "state", "speed_mode", "busy", "queued", "deliveries",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "orders_created",
            "orders_assigned",
            "deliveries",
            "path_failures",
            "congested",
            "active_orders",
            "idle_robots",
        ])?;

        let mut stats = Writer::from_path(dir.join("robot_stats.csv"))?;
        stats.write_record(["robot_id", "deliveries", "total_latency", "average_latency"])?;

        Ok(Self {
            snapshots,
            summaries,
            stats,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.robot_id.to_string(),
                row.tick.to_string(),
                row.row.to_string(),
                row.col.to_string(),
                row.state.to_string(),
                row.speed_mode.to_string(),
                (row.busy as u8).to_string(),
                row.queued.to_string(),
                row.deliveries.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.orders_created.to_string(),
            row.orders_assigned.to_string(),
            row.deliveries.to_string(),
            row.path_failures.to_string(),
            (row.congested as u8).to_string(),
            row.active_orders.to_string(),
            row.idle_robots.to_string(),
        ])?;
        Ok(())
    }

    fn write_robot_stats(&mut self, rows: &[RobotStatsRow]) -> OutputResult<()> {
        for row in rows {
            self.stats.write_record(&[
                row.robot_id.to_string(),
                row.deliveries.to_string(),
                row.total_latency.to_string(),
                format!("{:.3}", row.average_latency),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.stats.flush()?;
        Ok(())
    }
}
