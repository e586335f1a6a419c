//! Application mode types for session state management.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The top-level state of the orchestrator.
///
/// `Chatting` holds while no task exists, `TaskMode` while a task is pending,
/// and `TasksCompleted` once every task carries a justification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppMode {
    /// Free-text conversation with the model.
    #[default]
    Chatting,
    /// A validation task has been created and is running.
    TaskMode,
    /// All tasks are resolved; waiting for the user to start a new one.
    TasksCompleted,
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Chatting => "CHATTING",
            Self::TaskMode => "TASK_MODE",
            Self::TasksCompleted => "TASKS_COMPLETED",
        };
        f.write_str(label)
    }
}
