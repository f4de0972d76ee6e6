use shared_resources::direction::Direction;

/// Reasons a call is turned away at admission. None of them change the
/// cabin's state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid floor {floor}. Please select a floor between 1 and {top_floor}.")]
    OutOfRangeFloor { floor: u8, top_floor: u8 },
    #[error("Invalid request for floor {floor} going {direction}. Floor 1 can only go up, and the top floor can only go down.")]
    InvalidBoundaryDirection { floor: u8, direction: Direction },
    #[error("You are already on floor {floor}.")]
    RedundantInsideCall { floor: u8 },
    #[error("The elevator system has been stopped.")]
    Stopped,
}

/// A cabin wait was cut short by `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Elevator waiting interrupted.")]
pub struct SuspensionInterrupted;
