//! Run configuration.
//!
//! `FleetConfig` replaces process-wide constants: every tunable the engine
//! reads is a field here and the value is passed explicitly to the grid, the
//! dispatcher and the tick driver.  Applications typically build it from
//! `Default` and override a few fields, or (with the `serde` feature) load a
//! JSON/TOML document where every field is optional.

use std::fmt;

use crate::{Cell, FleetError, FleetResult};

// ── PathStrategy ──────────────────────────────────────────────────────────────

/// Which graph search the engine uses for every path query.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathStrategy {
    /// Priority queue on accumulated cost + Euclidean estimate (A*-style).
    #[default]
    BestFirst,
    /// Level-order expansion; minimum edge count.
    BreadthFirst,
    /// Stack-based, goal-directed, no optimality guarantee.
    DepthFirst,
    /// Dijkstra-style; same lengths as breadth-first under unit costs.
    UniformCost,
}

impl PathStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            PathStrategy::BestFirst    => "best_first",
            PathStrategy::BreadthFirst => "breadth_first",
            PathStrategy::DepthFirst   => "depth_first",
            PathStrategy::UniformCost  => "uniform_cost",
        }
    }
}

impl fmt::Display for PathStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PathStrategy {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "best_first" | "astar"     => Ok(PathStrategy::BestFirst),
            "breadth_first" | "bfs"    => Ok(PathStrategy::BreadthFirst),
            "depth_first" | "dfs"      => Ok(PathStrategy::DepthFirst),
            "uniform_cost" | "dijkstra" => Ok(PathStrategy::UniformCost),
            other => Err(FleetError::Config(format!("unknown path strategy {other:?}"))),
        }
    }
}

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Width and height of the square grid.
    pub grid_size: u32,

    /// Fraction of cells turned into obstacles at construction, in `[0, 1)`.
    pub obstacle_ratio: f64,

    /// Warehouse cell every robot starts from and returns to.
    pub depot: Cell,

    /// Robots created at the depot, ids `0..robot_count`.
    pub robot_count: u32,

    /// Upper bound on a robot's order queue (and on a dispatch group).
    pub max_orders_per_robot: usize,

    /// Order generation runs on ticks `t % period == 0`, dispatch on
    /// `t % period == 1`.
    pub generation_period: u64,

    /// Dwell at the depot after returning, before the robot is dispatchable.
    pub wait_ticks: u64,

    /// Weight of order age in the priority score
    /// (`age_weight * age - distance_to_depot`).
    pub age_weight: f64,

    /// Squared radius around a group seed within which orders join the group.
    pub group_radius_sq: i64,

    /// Generation is skipped while non-delivered orders fill at least this
    /// fraction of the free cells.
    pub congestion_ratio: f64,

    /// Ticks a delivered order stays visible before the registry drops it.
    pub delivered_grace_ticks: u64,

    /// Generate random orders on the generation phase.  Disable to drive the
    /// run purely from seeded orders.
    pub auto_generate: bool,

    /// Search used for every path query.
    pub path_strategy: PathStrategy,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Stop after this many ticks.  `None` runs until a stop is requested.
    pub max_ticks: Option<u64>,

    /// Emit a snapshot every N ticks.  1 = every tick; 0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            grid_size:               20,
            obstacle_ratio:          0.2,
            depot:                   Cell::new(0, 0),
            robot_count:             3,
            max_orders_per_robot:    4,
            generation_period:       5,
            wait_ticks:              5,
            age_weight:              1.0,
            group_radius_sq:         25,
            congestion_ratio:        0.8,
            delivered_grace_ticks:   20,
            auto_generate:           true,
            path_strategy:           PathStrategy::BestFirst,
            seed:                    42,
            max_ticks:               None,
            snapshot_interval_ticks: 1,
            num_threads:             None,
        }
    }
}

impl FleetConfig {
    /// Check every field for values the engine cannot run with.
    pub fn validate(&self) -> FleetResult<()> {
        let bad = |msg: String| Err(FleetError::Config(msg));

        if self.grid_size == 0 {
            return bad("grid_size must be positive".into());
        }
        let n = self.grid_size as i32;
        if !(0..n).contains(&self.depot.row) || !(0..n).contains(&self.depot.col) {
            return bad(format!("depot {} is outside a {n}x{n} grid", self.depot));
        }
        if !(0.0..1.0).contains(&self.obstacle_ratio) {
            return bad(format!("obstacle_ratio {} must be in [0, 1)", self.obstacle_ratio));
        }
        if self.max_orders_per_robot == 0 {
            return bad("max_orders_per_robot must be at least 1".into());
        }
        if self.generation_period < 2 {
            return bad(format!(
                "generation_period {} must be at least 2 so generation and dispatch use distinct ticks",
                self.generation_period
            ));
        }
        if !(self.congestion_ratio > 0.0 && self.congestion_ratio <= 1.0) {
            return bad(format!("congestion_ratio {} must be in (0, 1]", self.congestion_ratio));
        }
        if !self.age_weight.is_finite() {
            return bad("age_weight must be finite".into());
        }
        if self.group_radius_sq < 0 {
            return bad("group_radius_sq must be non-negative".into());
        }
        Ok(())
    }

    /// Number of free (non-obstacle, non-depot) cells at which the
    /// congestion guard trips, given the grid's actual free-cell count.
    pub fn congestion_limit(&self, free_cells: usize) -> usize {
        (free_cells as f64 * self.congestion_ratio).ceil() as usize
    }
}
