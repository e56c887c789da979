//! depot: a single-depot delivery fleet on a random obstacle grid.
//!
//! ```text
//! cargo run --release -p depot [config.json] [orders.csv]
//! ```
//!
//! `config.json` overrides any subset of `FleetConfig` fields; `orders.csv`
//! (`row,col[,created_at]`) seeds orders before tick 0.  Snapshots stream to a
//! renderer thread that stops the run once the delivery target is met.
//! Set `RUST_LOG=debug` to see every delivery and dwell.

mod ascii;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleet_core::FleetConfig;
use fleet_orders::load_orders_csv;
use fleet_output::{CsvWriter, FrameChannelObserver, SimOutputObserver};
use fleet_sim::{SimBuilder, SnapshotFrame};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_MAX_TICKS: u64   = 2_000;
const DELIVERY_TARGET:   u64   = 150;
const FRAME_BUFFER:      usize = 64;
const OUTPUT_DIR:        &str  = "output/depot";

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<FleetConfig> {
    let mut config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading config {}", p.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", p.display()))?
        }
        None => FleetConfig::default(),
    };
    if config.max_ticks.is_none() {
        config.max_ticks = Some(DEFAULT_MAX_TICKS);
    }
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let config_path = args.next();
    let orders_path = args.next();

    // 1. Configuration and thread pool.
    let config = load_config(config_path.as_deref())?;
    if let Some(n) = config.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("configuring the rayon pool")?;
    }
    println!("=== depot: rust_fleet delivery simulator ===");
    println!(
        "Grid: {0}x{0}  |  Robots: {1}  |  Strategy: {2:?}  |  Seed: {3}",
        config.grid_size, config.robot_count, config.path_strategy, config.seed
    );
    println!();

    // 2. Build sim, with optional seed orders.
    let seeds = match &orders_path {
        Some(p) => load_orders_csv(p).with_context(|| format!("loading orders {}", p.display()))?,
        None => Vec::new(),
    };
    let mut sim = SimBuilder::new(config).seed_orders(seeds).build()?;
    info!(
        free_cells = sim.grid.free_cell_count(),
        seeded = sim.orders.len(),
        "grid ready"
    );

    // 3. Output: CSV files plus a frame stream to the renderer thread.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let csv = SimOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);
    let (frames, rx) = FrameChannelObserver::bounded(FRAME_BUFFER);

    let stop = sim.stop_handle();
    let renderer = thread::spawn(move || {
        let mut last: Option<SnapshotFrame> = None;
        for frame in rx {
            if frame.total_deliveries() >= DELIVERY_TARGET {
                stop.request_stop();
            }
            last = Some(frame);
        }
        last
    });

    // 4. Run.
    let mut obs = (csv, frames);
    let t0 = Instant::now();
    let stats = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    let (mut csv, frames) = obs;
    if let Some(e) = csv.take_error() {
        eprintln!("output error: {e}");
    }
    let dropped = frames.dropped();
    drop(frames);
    let last_frame = renderer
        .join()
        .map_err(|_| anyhow::anyhow!("renderer thread panicked"))?;

    // 5. Summary.
    println!("Simulation complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), stats.elapsed_ticks);
    println!(
        "  orders: {} created, {} delivered, {} outstanding",
        stats.orders_created, stats.orders_delivered, stats.orders_outstanding
    );
    println!(
        "  congestion skips: {}  |  path failures: {}  |  frames dropped: {}",
        stats.congestion_skips, stats.path_failures, dropped
    );
    println!("  mean delivery latency: {:.2} ticks", stats.average_latency());
    println!();

    println!("{:<8} {:>10} {:>14} {:>12}", "Robot", "Delivered", "Total latency", "Avg latency");
    println!("{}", "-".repeat(47));
    for r in &stats.robots {
        println!(
            "{:<8} {:>10} {:>14} {:>12.2}",
            r.id.to_string(),
            r.deliveries,
            r.total_latency,
            r.average_latency
        );
    }

    if let Some(frame) = last_frame {
        println!();
        println!("Last frame ({}):", frame.tick);
        print!("{}", ascii::render(&frame));
    }

    Ok(())
}
