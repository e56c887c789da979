//! `fleet-spatial`: the obstacle grid and path search.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`grid`]     | `GridWorld` (occupancy + R-tree of obstacles), `GridBuilder` |
//! | [`pathfind`] | `PathFinder` trait, `BestFirst`, `BreadthFirst`, `DepthFirst`, `UniformCost` |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Adjacency
//!
//! Every search runs on 8-connected adjacency with a uniform step cost of 1,
//! diagonal or not.  On an obstacle-free grid a shortest path therefore has
//! exactly `Cell::chebyshev(start, goal)` edges.

pub mod error;
pub mod grid;
pub mod pathfind;


pub use error::{SpatialError, SpatialResult};
pub use grid::{GridBuilder, GridWorld, NEIGHBOR_OFFSETS};
pub use pathfind::{
    BestFirst, BreadthFirst, DepthFirst, Path, PathFinder, UniformCost, is_valid_path,
};
