//! Task domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::verdict::TaskVerdict;

/// Description given to every log validation task.
pub const VALIDATION_TASK_DESCRIPTION: &str = "Validate test case against EPS log";

/// A single unit of work tracked from creation to completion.
///
/// A task is created pending and resolved exactly once through
/// [`Task::complete`], which stores the model's justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub completed: bool,
    pub justification: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub log_content: Option<String>,
    pub test_case_content: Option<String>,
}

impl Task {
    /// Creates a pending validation task carrying the log and test case.
    pub fn validation(log_content: impl Into<String>, test_case_content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: VALIDATION_TASK_DESCRIPTION.to_string(),
            completed: false,
            justification: None,
            completed_at: None,
            log_content: Some(log_content.into()),
            test_case_content: Some(test_case_content.into()),
        }
    }

    /// Marks the task completed with the given justification.
    ///
    /// Has no effect on a task that is already completed.
    pub fn complete(&mut self, justification: impl Into<String>, at: DateTime<Utc>) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.justification = Some(justification.into());
        self.completed_at = Some(at);
    }

    /// Parsed verdict of a completed task.
    pub fn verdict(&self) -> Option<TaskVerdict> {
        self.justification
            .as_deref()
            .map(TaskVerdict::from_justification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::OverallResult;

    #[test]
    fn test_validation_task_starts_pending() {
        let task = Task::validation("log", "case");
        assert!(!task.completed);
        assert_eq!(task.description, VALIDATION_TASK_DESCRIPTION);
        assert_eq!(task.log_content.as_deref(), Some("log"));
        assert_eq!(task.test_case_content.as_deref(), Some("case"));
        assert!(task.verdict().is_none());
    }

    #[test]
    fn test_complete_is_applied_once() {
        let mut task = Task::validation("log", "case");
        let first = Utc::now();
        task.complete("Overall Result: PASS", first);
        task.complete("Overall Result: FAIL", Utc::now());

        assert!(task.completed);
        assert_eq!(task.completed_at, Some(first));
        assert_eq!(task.verdict().map(|v| v.result), Some(OverallResult::Pass));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Task::validation("a", "b").id, Task::validation("a", "b").id);
    }
}
