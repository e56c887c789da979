//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use fleet_core::{FleetConfig, FleetError, PathStrategy, RobotId, SimClock, SimRng, Tick};
use fleet_dispatch::{DispatchParams, Dispatcher};
use fleet_orders::{OrderGenerator, OrderRegistry, OrderSeed};
use fleet_robot::Robot;
use fleet_spatial::{GridBuilder, GridWorld, PathFinder};

use crate::{Sim, SimResult, StopHandle};

/// Child-stream offset for the obstacle layout.
const OBSTACLE_STREAM: u64 = 0x0b57;

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`FleetConfig`]: grid, fleet size, periods, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                              |
/// |-------------------|------------------------------------------------------|
/// | `.grid(g)`        | Random obstacles from `obstacle_ratio` and `seed`    |
/// | `.finder(f)`      | `config.path_strategy`                               |
/// | `.seed_orders(v)` | No orders until the first generation tick            |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .seed_orders(load_orders_csv("orders.csv")?)
///     .build()?;
/// let stats = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PathFinder> {
    config: FleetConfig,
    finder: P,
    grid:   Option<GridWorld>,
    seeds:  Vec<OrderSeed>,
}

impl SimBuilder<PathStrategy> {
    /// Create a builder that searches with `config.path_strategy`.
    pub fn new(config: FleetConfig) -> Self {
        let finder = config.path_strategy;
        Self { config, finder, grid: None, seeds: Vec::new() }
    }
}

impl<P: PathFinder> SimBuilder<P> {
    /// Replace the path search, e.g. with a custom [`PathFinder`].
    pub fn finder<Q: PathFinder>(self, finder: Q) -> SimBuilder<Q> {
        SimBuilder {
            config: self.config,
            finder,
            grid:   self.grid,
            seeds:  self.seeds,
        }
    }

    /// Use a pre-built grid instead of a random layout.
    ///
    /// Its size and depot must match the configuration.
    pub fn grid(mut self, grid: GridWorld) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Orders registered before tick 0.  Seeds without a creation tick are
    /// stamped `T0`.
    pub fn seed_orders(mut self, seeds: impl IntoIterator<Item = OrderSeed>) -> Self {
        self.seeds.extend(seeds);
        self
    }

    /// Validate the configuration, lay out the grid, park the robots at the
    /// depot, and register the seed orders.
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;
        let config = self.config;
        let mut rng = SimRng::new(config.seed);

        let grid = match self.grid {
            Some(g) => {
                if g.size() != config.grid_size || g.depot() != config.depot {
                    return Err(FleetError::Config(format!(
                        "supplied grid ({}x{}, depot {}) does not match config ({}x{}, depot {})",
                        g.size(),
                        g.size(),
                        g.depot(),
                        config.grid_size,
                        config.grid_size,
                        config.depot,
                    ))
                    .into());
                }
                g
            }
            None => {
                let mut layout = rng.child(OBSTACLE_STREAM);
                GridBuilder::new(config.grid_size, config.depot)
                    .random_obstacles(config.obstacle_ratio, &mut layout)?
                    .build()?
            }
        };

        let robots: Vec<Robot> = (0..config.robot_count)
            .map(|i| Robot::new(RobotId(i), grid.depot(), config.max_orders_per_robot))
            .collect();

        let mut orders = OrderRegistry::new(config.delivered_grace_ticks);
        for seed in self.seeds {
            orders.insert(&grid, seed.location, seed.created_at.unwrap_or(Tick::ZERO))?;
        }

        let generator = OrderGenerator::new(&grid);
        info!(
            size = grid.size(),
            obstacles = grid.obstacle_count(),
            free = grid.free_cell_count(),
            robots = robots.len(),
            seeded = orders.len(),
            "simulation built"
        );

        Ok(Sim {
            clock: SimClock::new(),
            dispatcher: Dispatcher::new(self.finder, DispatchParams::from_config(&config)),
            config,
            grid,
            robots,
            orders,
            generator,
            rng,
            stop: StopHandle::new(),
            totals: Default::default(),
        })
    }
}
