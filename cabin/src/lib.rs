pub mod modules;
pub mod utilities;

pub use utilities::cabin::Cabin;
pub use utilities::elevator_status::{Behaviour, ElevatorStatus};
pub use utilities::error::{RequestError, SuspensionInterrupted};
