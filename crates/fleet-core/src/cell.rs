//! Grid coordinate type and distance helpers.
//!
//! A `Cell` is a `(row, col)` pair.  Components are signed so neighbour
//! offsets can be applied without casts; bounds checking is the grid's job.

/// One square of the delivery grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell displaced by `(dr, dc)`.
    #[inline]
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self { row: self.row + dr, col: self.col + dc }
    }

    /// Squared Euclidean distance.  Exact, so it is used for radius tests.
    #[inline]
    pub fn distance_sq(self, other: Cell) -> i64 {
        let dr = (self.row - other.row) as i64;
        let dc = (self.col - other.col) as i64;
        dr * dr + dc * dc
    }

    /// Straight-line distance.
    #[inline]
    pub fn distance(self, other: Cell) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }

    /// King-move distance: the edge count of a shortest path on an empty
    /// 8-connected grid.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        let dr = (self.row - other.row).unsigned_abs();
        let dc = (self.col - other.col).unsigned_abs();
        dr.max(dc)
    }

    /// `true` if `other` is one king move away (not equal).
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self != other && self.chebyshev(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
