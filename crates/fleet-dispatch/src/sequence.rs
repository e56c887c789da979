//! Exhaustive delivery sequencing.
//!
//! Groups are small (at most `max_orders_per_robot`, typically 4, so at most
//! 24 orderings), which makes brute force exact and cheap.  Every leg a
//! permutation could use is searched once up front into a [`LegTable`];
//! permutations then only add up edge counts.
//!
//! Permutations are visited in lexicographic order of stop indices, and a
//! candidate replaces the incumbent only if strictly cheaper.  Ties therefore
//! go to the ordering closest to the input (priority) order.

use fleet_core::Cell;
use fleet_spatial::{GridWorld, Path, PathFinder};

/// Paths between the start cell and every stop, and between every pair of
/// stops.  Node `0` is the start; stop `i` is node `i + 1`.
pub struct LegTable {
    nodes: usize,
    legs:  Vec<Option<Path>>,
}

impl LegTable {
    /// Search all `(n + 1) · n` directed legs for `stops` from `start`.
    pub fn build<P: PathFinder + ?Sized>(
        grid:   &GridWorld,
        finder: &P,
        start:  Cell,
        stops:  &[Cell],
    ) -> Self {
        let nodes = stops.len() + 1;
        let cell = |n: usize| if n == 0 { start } else { stops[n - 1] };
        let mut legs = Vec::with_capacity(nodes * nodes);
        for from in 0..nodes {
            for to in 0..nodes {
                // Nothing ever travels back to the start node.
                legs.push(if to == 0 || from == to {
                    None
                } else {
                    finder.find_path(grid, cell(from), cell(to))
                });
            }
        }
        Self { nodes, legs }
    }

    /// Path between two nodes (`0` = start, `i + 1` = stop `i`).
    pub fn leg(&self, from: usize, to: usize) -> Option<&Path> {
        self.legs[from * self.nodes + to].as_ref()
    }

    /// Edge count of a leg, `None` if unreachable.
    pub fn leg_len(&self, from: usize, to: usize) -> Option<usize> {
        self.leg(from, to).map(|p| p.len() - 1)
    }

    pub fn stop_count(&self) -> usize {
        self.nodes - 1
    }
}

/// The winning delivery order for a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    /// Stop indices in delivery order.
    pub order:     Vec<usize>,
    /// Total path edges from the start through every stop.
    pub total_len: usize,
}

/// The cheapest permutation of the table's stops, or `None` if every
/// permutation contains an unreachable leg.
pub fn best_sequence(table: &LegTable) -> Option<Sequence> {
    let n = table.stop_count();
    if n == 0 {
        return Some(Sequence { order: Vec::new(), total_len: 0 });
    }

    let mut perm: Vec<usize> = (0..n).collect();
    let mut best: Option<Sequence> = None;
    loop {
        if let Some(len) = permutation_len(table, &perm) {
            if best.as_ref().is_none_or(|b| len < b.total_len) {
                best = Some(Sequence { order: perm.clone(), total_len: len });
            }
        }
        if !next_permutation(&mut perm) {
            return best;
        }
    }
}

fn permutation_len(table: &LegTable, perm: &[usize]) -> Option<usize> {
    let mut at = 0;
    let mut total = 0;
    for &stop in perm {
        total += table.leg_len(at, stop + 1)?;
        at = stop + 1;
    }
    Some(total)
}

/// Rearrange `xs` into the next lexicographic permutation.  Returns `false`
/// (leaving `xs` sorted descending) once the last permutation was reached.
fn next_permutation(xs: &mut [usize]) -> bool {
    let Some(pivot) = xs.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let at_pivot = xs[pivot];
    let Some(swap) = xs.iter().rposition(|&x| x > at_pivot) else {
        return false;
    };
    xs.swap(pivot, swap);
    xs[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod permutations {
    use super::next_permutation;

    #[test]
    fn visits_all_in_lexicographic_order() {
        let mut p = vec![0, 1, 2];
        let mut seen = vec![p.clone()];
        while next_permutation(&mut p) {
            seen.push(p.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn four_stops_give_twenty_four() {
        let mut p = vec![0, 1, 2, 3];
        let mut count = 1;
        while next_permutation(&mut p) {
            count += 1;
        }
        assert_eq!(count, 24);
    }
}
