use fleet_core::FleetError;
use fleet_dispatch::DispatchError;
use fleet_orders::OrderError;
use fleet_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error("grid construction failed: {0}")]
    Grid(#[from] SpatialError),

    /// An order transition was rejected.  Always fatal: registry and robots
    /// no longer agree.
    #[error("order registry: {0}")]
    Order(#[from] OrderError),

    #[error("dispatch cycle aborted: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type SimResult<T> = Result<T, SimError>;
