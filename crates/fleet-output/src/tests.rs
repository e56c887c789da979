//! Integration tests for fleet-output.

use fleet_core::{Cell, FleetConfig, PathStrategy};
use fleet_sim::{Sim, SimBuilder};

/// Obstacle-free 10×10 run with generation off.
fn small_sim(robots: u32, max_ticks: u64, interval: u64) -> Sim<PathStrategy> {
    let config = FleetConfig {
        grid_size:               10,
        obstacle_ratio:          0.0,
        robot_count:             robots,
        auto_generate:           false,
        max_ticks:               Some(max_ticks),
        snapshot_interval_ticks: interval,
        ..FleetConfig::default()
    };
    SimBuilder::new(config).build().unwrap()
}

// ── CSV writer ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use fleet_orders::OrderSeed;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{RobotSnapshotRow, RobotStatsRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    fn snap_row(robot_id: u32, tick: u64) -> RobotSnapshotRow {
        RobotSnapshotRow {
            robot_id,
            tick,
            row:        robot_id as i32,
            col:        2,
            state:      "en_route",
            speed_mode: "fast",
            busy:       true,
            queued:     1,
            deliveries: 0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("robot_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("robot_stats.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir, "robot_snapshots.csv"),
            ["robot_id", "tick", "row", "col", "state", "speed_mode", "busy", "queued", "deliveries"]
        );
        assert_eq!(
            headers(&dir, "tick_summaries.csv"),
            [
                "tick",
                "orders_created",
                "orders_assigned",
                "deliveries",
                "path_failures",
                "congested",
                "active_orders",
                "idle_robots",
            ]
        );
        assert_eq!(
            headers(&dir, "robot_stats.csv"),
            ["robot_id", "deliveries", "total_latency", "average_latency"]
        );
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "robot_snapshots.csv");
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0"); // robot_id
        assert_eq!(&rows[0][1], "5"); // tick
        assert_eq!(&rows[1][2], "1"); // row
        assert_eq!(&rows[2][4], "en_route");
        assert_eq!(&rows[2][6], "1"); // busy
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:            3,
            orders_created:  1,
            orders_assigned: 0,
            deliveries:      2,
            path_failures:   0,
            congested:       true,
            active_orders:   9,
            idle_robots:     1,
        })
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][3], "2");
        assert_eq!(&rows[0][5], "1"); // congested
        assert_eq!(&rows[0][6], "9");
    }

    #[test]
    fn csv_stats_latency_has_three_decimals() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_robot_stats(&[RobotStatsRow {
            robot_id:        4,
            deliveries:      3,
            total_latency:   10,
            average_latency: 10.0 / 3.0,
        }])
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "robot_stats.csv");
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][3], "3.333");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }

    #[test]
    fn missing_directory_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn integration_csv() {
        let mut sim = small_sim(3, 6, 2);

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // interval 2 → snapshots at ticks 0, 2, 4 (3 ticks × 3 robots = 9 rows)
        assert_eq!(records(&dir, "robot_snapshots.csv").len(), 9);
        assert_eq!(records(&dir, "tick_summaries.csv").len(), 6);
        assert_eq!(records(&dir, "robot_stats.csv").len(), 3);
    }

    #[test]
    fn integration_records_delivery() {
        let config = FleetConfig {
            grid_size:      10,
            obstacle_ratio: 0.0,
            robot_count:    1,
            auto_generate:  false,
            max_ticks:      Some(20),
            ..FleetConfig::default()
        };
        let mut sim = SimBuilder::new(config)
            .seed_orders([OrderSeed { location: Cell::new(3, 4), created_at: None }])
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let stats = records(&dir, "robot_stats.csv");
        assert_eq!(&stats[0][1], "1");
        assert_eq!(&stats[0][3], "4.000");

        let summaries = records(&dir, "tick_summaries.csv");
        assert_eq!(&summaries[1][2], "1", "assigned on tick 1");
        assert_eq!(&summaries[4][3], "1", "delivered on tick 4");
    }
}

// ── Frame channel ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod channel_tests {
    use fleet_core::Tick;

    use super::*;
    use crate::channel::FrameChannelObserver;

    #[test]
    fn frames_reach_the_consumer() {
        let mut sim = small_sim(2, 5, 1);
        let (mut obs, rx) = FrameChannelObserver::bounded(16);
        sim.run(&mut obs).unwrap();

        let frames: Vec<_> = rx.try_iter().collect();
        assert_eq!(frames.len(), 5);
        assert_eq!(obs.sent(), 5);
        assert_eq!(obs.dropped(), 0);
        let ticks: Vec<Tick> = frames.iter().map(|f| f.tick).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(1), Tick(2), Tick(3), Tick(4)]);
        assert!(frames.iter().all(|f| f.robots.len() == 2 && f.grid_size == 10));
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let mut sim = small_sim(1, 4, 1);
        let (mut obs, rx) = FrameChannelObserver::bounded(1);
        sim.run(&mut obs).unwrap();

        assert_eq!(obs.sent(), 1);
        assert_eq!(obs.dropped(), 3);
        assert_eq!(rx.try_iter().next().map(|f| f.tick), Some(Tick(0)));
    }

    #[test]
    fn gone_receiver_stops_frames() {
        let mut sim = small_sim(1, 3, 1);
        let (mut obs, rx) = FrameChannelObserver::bounded(4);
        drop(rx);
        sim.run(&mut obs).unwrap();

        assert!(obs.is_disconnected());
        assert_eq!(obs.sent(), 0);
        assert_eq!(obs.dropped(), 0);
    }

    #[test]
    fn combines_with_csv_observer() {
        use crate::{CsvWriter, SimOutputObserver};

        let dir = tempfile::tempdir().unwrap();
        let mut sim = small_sim(1, 3, 1);
        let csv = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let (frames, rx) = FrameChannelObserver::bounded(8);
        let mut obs = (csv, frames);
        sim.run(&mut obs).unwrap();

        assert!(obs.0.take_error().is_none());
        assert_eq!(obs.1.sent(), 3);
        assert_eq!(rx.len(), 3);
        assert!(dir.path().join("robot_stats.csv").exists());
    }
}
