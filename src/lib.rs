pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;

pub use error::GameError;
