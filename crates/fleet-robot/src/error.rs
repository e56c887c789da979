use fleet_core::{OrderId, RobotId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RobotError {
    /// The dispatcher tried to queue more orders than the robot can carry.
    #[error("robot {robot} is full ({capacity} orders), cannot take {order}")]
    CapacityExceeded {
        robot:    RobotId,
        order:    OrderId,
        capacity: usize,
    },

    #[error("robot {robot} already carries {order}")]
    DuplicateOrder { robot: RobotId, order: OrderId },
}

pub type RobotResult<T> = Result<T, RobotError>;
