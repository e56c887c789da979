use fleet_orders::OrderError;
use fleet_robot::RobotError;
use thiserror::Error;

/// Commit-time failures.  Both indicate an engine invariant violation; an
/// unroutable group is reported in the `DispatchReport`, not here.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("robot error: {0}")]
    Robot(#[from] RobotError),

    #[error("order error: {0}")]
    Order(#[from] OrderError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
