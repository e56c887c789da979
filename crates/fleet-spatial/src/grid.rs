//! Obstacle grid and builder.
//!
//! # Data layout
//!
//! Cells are stored row-major: `index = row * size + col`.  Per-cell data
//! (`blocked`, `reachable`) lives in flat `Vec<bool>`s, and search code keeps
//! its own per-cell scratch arrays indexed the same way, so the inner loops
//! never hash a `Cell`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds every obstacle cell.  Robots query it each
//! movement step for the nearest obstacle inside a small window; the
//! nearest-first iterator stops as soon as candidates leave the window.
//!
//! The grid is immutable once built, so it can be shared by reference with
//! the path finders, the dispatcher and every robot (including across rayon
//! workers) without locking.

use std::collections::{HashSet, VecDeque};

use rstar::RTree;

use fleet_core::{Cell, SimRng};

use crate::{SpatialError, SpatialResult};

/// 8-connected neighbour offsets, in expansion order: N, S, W, E, NW, SW, NE, SE.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (-1, -1), (1, -1), (-1, 1), (1, 1),
];

// ── GridWorld ─────────────────────────────────────────────────────────────────

/// Square occupancy grid with a single depot cell.
///
/// Do not construct directly; use [`GridBuilder`], [`GridWorld::open`] or
/// [`GridWorld::parse`].
pub struct GridWorld {
    size:        u32,
    depot:       Cell,
    blocked:     Vec<bool>,
    /// Cells connected to the depot through passable cells.
    reachable:   Vec<bool>,
    /// Count of non-obstacle, non-depot cells.
    free_cells:  usize,
    obstacle_idx: RTree<[i32; 2]>,
}

impl GridWorld {
    /// An obstacle-free `size × size` grid.
    pub fn open(size: u32, depot: Cell) -> SpatialResult<Self> {
        GridBuilder::new(size, depot).build()
    }

    /// Build a grid from an ASCII picture: one line per row, `#` for an
    /// obstacle, `D` for the depot, anything else passable.  Lines must all
    /// have the grid's width and there must be exactly one `D`.
    ///
    /// ```
    /// use fleet_spatial::GridWorld;
    ///
    /// let grid = GridWorld::parse("D..\n.#.\n...").unwrap();
    /// assert_eq!(grid.size(), 3);
    /// assert_eq!(grid.obstacle_count(), 1);
    /// ```
    pub fn parse(text: &str) -> SpatialResult<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let size = rows.len();
        let mut depot = None;
        let mut obstacles = Vec::new();

        for (r, line) in rows.iter().enumerate() {
            if line.chars().count() != size {
                return Err(SpatialError::Parse(format!(
                    "row {r} has {} cells, expected {size}",
                    line.chars().count()
                )));
            }
            for (c, ch) in line.chars().enumerate() {
                let cell = Cell::new(r as i32, c as i32);
                match ch {
                    '#' => obstacles.push(cell),
                    'D' if depot.is_some() => {
                        return Err(SpatialError::Parse("more than one depot".into()));
                    }
                    'D' => depot = Some(cell),
                    _ => {}
                }
            }
        }

        let depot = depot.ok_or_else(|| SpatialError::Parse("no depot marked".into()))?;
        let mut b = GridBuilder::new(size as u32, depot);
        for cell in obstacles {
            b.add_obstacle(cell);
        }
        b.build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn depot(&self) -> Cell {
        self.depot
    }

    /// Total number of cells (`size²`).
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacle_idx.size()
    }

    /// Cells that are neither obstacles nor the depot.
    pub fn free_cell_count(&self) -> usize {
        self.free_cells
    }

    // ── Cell queries ──────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        let n = self.size as i32;
        (0..n).contains(&cell.row) && (0..n).contains(&cell.col)
    }

    /// Row-major index of an in-bounds cell.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell), "{cell} out of bounds");
        cell.row as usize * self.size as usize + cell.col as usize
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        let n = self.size as usize;
        Cell::new((index / n) as i32, (index % n) as i32)
    }

    /// `true` if `cell` is an obstacle.  Out-of-bounds cells are not
    /// obstacles; use [`is_passable`](Self::is_passable) for movement checks.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.blocked[self.index(cell)]
    }

    /// In bounds and not an obstacle.
    #[inline]
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.blocked[self.index(cell)]
    }

    /// `true` if a path from the depot to `cell` exists.
    #[inline]
    pub fn is_reachable_from_depot(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.reachable[self.index(cell)]
    }

    /// Passable 8-connected neighbours of `cell`, in [`NEIGHBOR_OFFSETS`] order.
    #[inline]
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dr, dc)| cell.offset(dr, dc))
            .filter(move |&n| self.is_passable(n))
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(move |i| self.cell_at(i))
    }

    /// Obstacle cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(move |(i, _)| self.cell_at(i))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Euclidean distance from `cell` to the nearest obstacle inside the
    /// square window of half-width `radius` centred on `cell`.
    ///
    /// Returns `None` when the window holds no obstacle.  Cells beyond the
    /// grid edge are not obstacles.
    pub fn nearest_obstacle_distance(&self, cell: Cell, radius: i32) -> Option<f64> {
        // Nothing inside the window is farther than its corner.
        let max_sq = 2 * (radius as i64) * (radius as i64);
        self.obstacle_idx
            .nearest_neighbor_iter(&[cell.row, cell.col])
            .map(|&[r, c]| Cell::new(r, c))
            .take_while(|&o| cell.distance_sq(o) <= max_sq)
            .find(|o| (o.row - cell.row).abs() <= radius && (o.col - cell.col).abs() <= radius)
            .map(|o| cell.distance(o))
    }
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`GridWorld`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use fleet_core::{Cell, SimRng};
/// use fleet_spatial::GridBuilder;
///
/// let mut rng = SimRng::new(7);
/// let grid = GridBuilder::new(10, Cell::new(0, 0))
///     .random_obstacles(0.2, &mut rng)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(grid.obstacle_count(), 20);
/// assert!(!grid.is_blocked(grid.depot()));
/// ```
pub struct GridBuilder {
    size:      u32,
    depot:     Cell,
    obstacles: Vec<Cell>,
}

impl GridBuilder {
    pub fn new(size: u32, depot: Cell) -> Self {
        Self { size, depot, obstacles: Vec::new() }
    }

    /// Mark `cell` as an obstacle.  Duplicates are harmless.
    pub fn add_obstacle(&mut self, cell: Cell) {
        self.obstacles.push(cell);
    }

    /// Chaining form of [`add_obstacle`](Self::add_obstacle).
    pub fn obstacle(mut self, cell: Cell) -> Self {
        self.add_obstacle(cell);
        self
    }

    /// Scatter obstacles uniformly until `floor(size² × ratio)` cells are
    /// blocked in total.  The depot is never chosen, so at most `size² − 1`
    /// cells can be blocked.
    pub fn random_obstacles(mut self, ratio: f64, rng: &mut SimRng) -> SpatialResult<Self> {
        if !(0.0..1.0).contains(&ratio) {
            return Err(SpatialError::InvalidRatio(ratio));
        }
        let total  = self.size as usize * self.size as usize;
        let target = ((total as f64 * ratio) as usize).min(total.saturating_sub(1));

        let existing: HashSet<Cell> = self.obstacles.iter().copied().collect();
        if existing.len() >= target {
            return Ok(self);
        }

        let n = self.size as i32;
        let mut candidates: Vec<Cell> = (0..n)
            .flat_map(|r| (0..n).map(move |c| Cell::new(r, c)))
            .filter(|&c| c != self.depot && !existing.contains(&c))
            .collect();
        rng.shuffle(&mut candidates);
        candidates.truncate(target - existing.len());
        self.obstacles.extend(candidates);
        Ok(self)
    }

    /// Validate the layout and produce a [`GridWorld`].
    ///
    /// Computes depot reachability with one flood fill and bulk-loads the
    /// obstacle R-tree.
    pub fn build(self) -> SpatialResult<GridWorld> {
        if self.size == 0 {
            return Err(SpatialError::EmptyGrid);
        }
        let n = self.size as i32;
        let in_bounds = |c: Cell| (0..n).contains(&c.row) && (0..n).contains(&c.col);
        if !in_bounds(self.depot) {
            return Err(SpatialError::OutOfBounds { cell: self.depot, size: self.size });
        }

        let total = self.size as usize * self.size as usize;
        let mut blocked = vec![false; total];
        for &cell in &self.obstacles {
            if !in_bounds(cell) {
                return Err(SpatialError::OutOfBounds { cell, size: self.size });
            }
            if cell == self.depot {
                return Err(SpatialError::DepotBlocked(cell));
            }
            blocked[cell.row as usize * self.size as usize + cell.col as usize] = true;
        }

        let points: Vec<[i32; 2]> = blocked
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| [(i / self.size as usize) as i32, (i % self.size as usize) as i32])
            .collect();
        let obstacle_count = points.len();

        let mut grid = GridWorld {
            size:         self.size,
            depot:        self.depot,
            blocked,
            reachable:    vec![false; total],
            free_cells:   total - obstacle_count - 1,
            obstacle_idx: RTree::bulk_load(points),
        };
        grid.reachable = flood_fill(&grid, self.depot);
        Ok(grid)
    }
}

/// Mark every cell reachable from `origin` through passable cells.
fn flood_fill(grid: &GridWorld, origin: Cell) -> Vec<bool> {
    let mut seen = vec![false; grid.cell_count()];
    let mut queue = VecDeque::from([origin]);
    seen[grid.index(origin)] = true;

    while let Some(cell) = queue.pop_front() {
        for n in grid.neighbors(cell) {
            let i = grid.index(n);
            if !seen[i] {
                seen[i] = true;
                queue.push_back(n);
            }
        }
    }
    seen
}
