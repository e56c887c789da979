//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `FleetError` as one
//! variant where configuration problems can surface.

use thiserror::Error;

use crate::{OrderId, RobotId};

/// The top-level error type for `fleet-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("robot {0} not found")]
    RobotNotFound(RobotId),

    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `fleet-*` crates.
pub type FleetResult<T> = Result<T, FleetError>;
