//! Random order placement.

use fleet_core::{Cell, OrderId, SimRng, Tick};
use fleet_spatial::GridWorld;

use crate::OrderRegistry;

/// Places new orders uniformly over the cells a robot could ever reach.
///
/// The candidate list (passable, depot-reachable, not the depot) is fixed by
/// the grid, so it is computed once.  Each draw filters out cells already
/// holding a live order and picks one of the rest, so a draw always
/// terminates even on a saturated grid.
pub struct OrderGenerator {
    candidates: Vec<Cell>,
}

impl OrderGenerator {
    pub fn new(grid: &GridWorld) -> Self {
        let depot = grid.depot();
        let candidates = grid
            .cells()
            .filter(|&c| c != depot && grid.is_reachable_from_depot(c))
            .collect();
        Self { candidates }
    }

    /// Cells that could ever receive a generated order.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Pick a free candidate cell, or `None` if every one is occupied.
    pub fn pick(&self, registry: &OrderRegistry, rng: &mut SimRng) -> Option<Cell> {
        let occupied = registry.occupied_locations();
        let free: Vec<Cell> = self
            .candidates
            .iter()
            .copied()
            .filter(|c| !occupied.contains(c))
            .collect();
        rng.choose(&free).copied()
    }

    /// Pick a cell and register an `Unassigned` order there.
    pub fn generate(
        &self,
        grid:     &GridWorld,
        registry: &mut OrderRegistry,
        rng:      &mut SimRng,
        now:      Tick,
    ) -> Option<OrderId> {
        let cell = self.pick(registry, rng)?;
        // Candidates are passable by construction.
        registry.insert(grid, cell, now).ok()
    }
}
