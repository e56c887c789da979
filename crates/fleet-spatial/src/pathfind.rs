//! Path search trait and the four grid search strategies.
//!
//! # Pluggability
//!
//! The dispatcher and the robots call path search through the
//! [`PathFinder`] trait, so the strategy is chosen by configuration
//! ([`PathStrategy`]) or by a custom implementation, never by editing call
//! sites.
//!
//! # Contract
//!
//! `find_path(grid, start, goal)` returns the cells from `start` to `goal`
//! inclusive, in traversal order, or `None` if no passable route exists.
//! `start == goal` yields `[start]`.  An out-of-bounds endpoint, or a blocked
//! endpoint other than the trivial case, yields `None`.
//!
//! # Costs
//!
//! Every edge costs 1, diagonal or orthogonal.  [`BestFirst`] ranks by
//! `g + euclidean(cell, goal)`; the Euclidean estimate can exceed the true
//! remaining cost when diagonals are cheap, so best-first is not guaranteed
//! to return a minimum-edge path around obstacles.  [`BreadthFirst`] and
//! [`UniformCost`] always do.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use fleet_core::{Cell, PathStrategy};

use crate::GridWorld;

/// An ordered cell sequence from start to goal, both inclusive.
pub type Path = Vec<Cell>;

/// Marker for "no predecessor" in the per-cell `prev` arrays.
const NO_PREV: u32 = u32::MAX;

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable grid search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one finder can be shared by every
/// robot during the parallel movement phase.
pub trait PathFinder: Send + Sync {
    /// Search for a route from `start` to `goal`.
    fn find_path(&self, grid: &GridWorld, start: Cell, goal: Cell) -> Option<Path>;

    /// Edge count of the route `find_path` would return.
    fn path_len(&self, grid: &GridWorld, start: Cell, goal: Cell) -> Option<usize> {
        self.find_path(grid, start, goal).map(|p| p.len() - 1)
    }
}

impl PathFinder for PathStrategy {
    fn find_path(&self, grid: &GridWorld, start: Cell, goal: Cell) -> Option<Path> {
        match self {
            PathStrategy::BestFirst    => BestFirst.find_path(grid, start, goal),
            PathStrategy::BreadthFirst => BreadthFirst.find_path(grid, start, goal),
            PathStrategy::DepthFirst   => DepthFirst.find_path(grid, start, goal),
            PathStrategy::UniformCost  => UniformCost.find_path(grid, start, goal),
        }
    }
}

impl<P: PathFinder + ?Sized> PathFinder for &P {
    fn find_path(&self, grid: &GridWorld, start: Cell, goal: Cell) -> Option<Path> {
        (**self).find_path(grid, start, goal)
    }
}

impl<P: PathFinder + ?Sized> PathFinder for Box<P> {
    fn find_path(&self, grid: &GridWorld, start: Cell, goal: Cell) -> Option<Path> {
        (**self).find_path(grid, start, goal)
    }
}

// ── Shared plumbing ───────────────────────────────────────────────────────────

enum Precheck {
    Done(Option<Path>),
    Search { start: u32, goal: u32 },
}

fn precheck(grid: &GridWorld, start: Cell, goal: Cell) -> Precheck {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return Precheck::Done(None);
    }
    if start == goal {
        return Precheck::Done(Some(vec![start]));
    }
    if grid.is_blocked(start) || grid.is_blocked(goal) {
        return Precheck::Done(None);
    }
    Precheck::Search {
        start: grid.index(start) as u32,
        goal:  grid.index(goal) as u32,
    }
}

/// Walk `prev` back from `goal` and return the path in traversal order.
fn reconstruct(grid: &GridWorld, prev: &[u32], goal: u32) -> Path {
    let mut path = vec![grid.cell_at(goal as usize)];
    let mut cur = goal;
    while prev[cur as usize] != NO_PREV {
        cur = prev[cur as usize];
        path.push(grid.cell_at(cur as usize));
    }
    path.reverse();
    path
}

/// `true` if `path` is a non-empty chain of passable, pairwise-adjacent cells.
pub fn is_valid_path(grid: &GridWorld, path: &[Cell]) -> bool {
    !path.is_empty()
        && path.iter().all(|&c| grid.is_passable(c))
        && path.windows(2).all(|w| w[0].is_adjacent(w[1]))
}

// ── BestFirst ─────────────────────────────────────────────────────────────────

/// A*-style search: accumulated cost plus straight-line estimate.
///
/// Equal priorities pop in insertion order.
pub struct BestFirst;

struct Frontier {
    priority: f64,
    seq:      u64,
    index:    u32,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // Reversed so the max-heap pops the lowest priority, then the oldest entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PathFinder for BestFirst {
    fn find_path(&self, grid: &GridWorld, start: Cell, goal: Cell) -> Option<Path> {
        let (start_i, goal_i) = match precheck(grid, start, goal) {
            Precheck::Done(result) => return result,
            Precheck::Search { start, goal } => (start, goal),
        };

        let n = grid.cell_count();
        let mut g      = vec![u32::MAX; n];
        let mut prev   = vec![NO_PREV; n];
        let mut closed = vec![false; n];
        let mut seq    = 0u64;

        g[start_i as usize] = 0;
        let mut heap = BinaryHeap::new();
        heap.push(Frontier { priority: start.distance(goal), seq, index: start_i });

        while let Some(Frontier { index, .. }) = heap.pop() {
            if index == goal_i {
                return Some(reconstruct(grid, &prev, goal_i));
            }
            if closed[index as usize] {
                continue;
            }
            closed[index as usize] = true;

            let cell = grid.cell_at(index as usize);
            let tentative = g[index as usize] + 1;
            for neighbor in grid.neighbors(cell) {
                let ni = grid.index(neighbor);
                if tentative < g[ni] {
                    g[ni] = tentative;
                    prev[ni] = index;
                    seq += 1;
                    heap.push(Frontier {
                        priority: tentative as f64 + neighbor.distance(goal),
                        seq,
                        index: ni as u32,
                    });
                }
            }
        }
        None
    }
}

// ── BreadthFirst ──────────────────────────────────────────────────────────────

/// Level-order search; returns a minimum-edge-count path.
pub struct BreadthFirst;

impl PathFinder for BreadthFirst {
    fn find_path(&self, grid: &GridWorld, start: Cell, goal: Cell) -> Option<Path> {
        let (start_i, goal_i) = match precheck(grid, start, goal) {
            Precheck::Done(result) => return result,
            Precheck::Search { start, goal } => (start, goal),
        };

        let n = grid.cell_count();
        let mut seen = vec![false; n];
        let mut prev = vec![NO_PREV; n];
        let mut queue = VecDeque::from([start_i]);
        seen[start_i as usize] = true;

        while let Some(index) = queue.pop_front() {
            if index == goal_i {
                return Some(reconstruct(grid, &prev, goal_i));
            }
            for neighbor in grid.neighbors(grid.cell_at(index as usize)) {
                let ni = grid.index(neighbor);
                if !seen[ni] {
                    seen[ni] = true;
                    prev[ni] = index;
                    queue.push_back(ni as u32);
                }
            }
        }
        None
    }
}

// ── DepthFirst ────────────────────────────────────────────────────────────────

/// Stack-based search with no optimality guarantee.
///
/// Neighbours are pushed farthest-from-goal first, so the one closest to the
/// goal is explored next.  On an open grid this walks straight to the goal.
pub struct DepthFirst;

impl PathFinder for DepthFirst {
    fn find_path(&self, grid: &GridWorld, start: Cell, goal: Cell) -> Option<Path> {
        let (start_i, goal_i) = match precheck(grid, start, goal) {
            Precheck::Done(result) => return result,
            Precheck::Search { start, goal } => (start, goal),
        };

        let n = grid.cell_count();
        let mut visited = vec![false; n];
        let mut prev    = vec![NO_PREV; n];
        let mut stack   = vec![(start_i, NO_PREV)];
        let mut fresh: Vec<Cell> = Vec::with_capacity(8);

        while let Some((index, parent)) = stack.pop() {
            if visited[index as usize] {
                continue;
            }
            visited[index as usize] = true;
            prev[index as usize] = parent;
            if index == goal_i {
                return Some(reconstruct(grid, &prev, goal_i));
            }

            fresh.clear();
            fresh.extend(
                grid.neighbors(grid.cell_at(index as usize))
                    .filter(|&c| !visited[grid.index(c)]),
            );
            fresh.sort_by_key(|&c| Reverse(c.distance_sq(goal)));
            stack.extend(fresh.iter().map(|&c| (grid.index(c) as u32, index)));
        }
        None
    }
}

// ── UniformCost ───────────────────────────────────────────────────────────────

/// Dijkstra-style search.  With unit edge costs its path lengths match
/// [`BreadthFirst`]; it exists so weighted costs can be added later without
/// changing callers.
pub struct UniformCost;

impl PathFinder for UniformCost {
    fn find_path(&self, grid: &GridWorld, start: Cell, goal: Cell) -> Option<Path> {
        let (start_i, goal_i) = match precheck(grid, start, goal) {
            Precheck::Done(result) => return result,
            Precheck::Search { start, goal } => (start, goal),
        };

        let n = grid.cell_count();
        let mut dist = vec![u32::MAX; n];
        let mut prev = vec![NO_PREV; n];
        let mut seq  = 0u64;

        dist[start_i as usize] = 0;
        // Min-heap on (cost, insertion order).
        let mut heap: BinaryHeap<Reverse<(u32, u64, u32)>> = BinaryHeap::new();
        heap.push(Reverse((0, seq, start_i)));

        while let Some(Reverse((cost, _, index))) = heap.pop() {
            if index == goal_i {
                return Some(reconstruct(grid, &prev, goal_i));
            }
            // Skip stale heap entries.
            if cost > dist[index as usize] {
                continue;
            }
            for neighbor in grid.neighbors(grid.cell_at(index as usize)) {
                let ni = grid.index(neighbor);
                let new_cost = cost + 1;
                if new_cost < dist[ni] {
                    dist[ni] = new_cost;
                    prev[ni] = index;
                    seq += 1;
                    heap.push(Reverse((new_cost, seq, ni as u32)));
                }
            }
        }
        None
    }
}
