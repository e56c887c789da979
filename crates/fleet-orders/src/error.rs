use thiserror::Error;

use fleet_core::{Cell, OrderId};

use crate::OrderStatus;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// A lifecycle transition was requested from the wrong status.  This is
    /// an engine invariant violation, not a recoverable condition.
    #[error("order {id} is {found}, expected {expected}")]
    InvalidState {
        id:       OrderId,
        expected: OrderStatus,
        found:    OrderStatus,
    },

    #[error("cell {0} is out of bounds or blocked")]
    InvalidLocation(Cell),

    #[error("cell {0} is not reachable from the depot")]
    Unreachable(Cell),

    #[error("order parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OrderResult<T> = Result<T, OrderError>;
