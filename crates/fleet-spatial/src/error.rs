//! Spatial-subsystem error type.

use thiserror::Error;

use fleet_core::Cell;

/// Errors produced while constructing a [`GridWorld`](crate::GridWorld).
///
/// Path search never fails with an error: an unreachable goal is a normal
/// outcome reported as `None`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("grid size must be positive")]
    EmptyGrid,

    #[error("cell {cell} is outside the {size}x{size} grid")]
    OutOfBounds { cell: Cell, size: u32 },

    #[error("depot {0} cannot be an obstacle")]
    DepotBlocked(Cell),

    #[error("obstacle ratio {0} must be in [0, 1)")]
    InvalidRatio(f64),

    #[error("grid parse error: {0}")]
    Parse(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
