pub mod config;
pub mod direction;
pub mod request;
