pub mod cabin;
pub mod debug;
pub mod elevator_status;
pub mod error;
pub mod requests;
pub mod timer;
