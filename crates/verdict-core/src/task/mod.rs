//! Task domain module.
//!
//! # Module Structure
//!
//! - `model`: the [`Task`] entity and its completion rule

mod model;

pub use model::{Task, VALIDATION_TASK_DESCRIPTION};
