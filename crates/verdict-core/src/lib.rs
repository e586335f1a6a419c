//! Domain layer of verdict: session state machine, validation prompt
//! preparation and verdict extraction.

pub mod config;
pub mod detection;
pub mod error;
pub mod export;
pub mod prompt;
pub mod session;
pub mod task;
pub mod verdict;

// Re-export common error types
pub use error::{ModelError, VerdictError};
