//! Report rendering for a completed validation.
//!
//! A [`ValidationReport`] is built from the session's completed task and
//! rendered either as a Markdown document (for download) or as a short
//! plain-text summary (for the clipboard).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionState;
use crate::verdict::{OverallResult, TaskVerdict};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub file_name: String,
    pub completed_at: DateTime<Utc>,
    pub description: String,
    pub result: OverallResult,
    pub reasoning: String,
    pub log_content: String,
    pub test_case_content: String,
}

impl ValidationReport {
    /// Builds the report for the session's completed task.
    ///
    /// Returns `None` while no task has been completed.
    pub fn from_session(state: &SessionState) -> Option<Self> {
        let task = state.completed_task()?;
        let justification = task.justification.as_deref().unwrap_or_default();
        let TaskVerdict { result, reasoning } = TaskVerdict::from_justification(justification);

        Some(Self {
            file_name: state.active_file_name.clone(),
            completed_at: task.completed_at.unwrap_or(state.last_completed_at),
            description: task.description.clone(),
            result,
            reasoning,
            log_content: task.log_content.clone().unwrap_or_default(),
            test_case_content: task.test_case_content.clone().unwrap_or_default(),
        })
    }

    /// File name offered for the Markdown download.
    pub fn suggested_file_name(&self) -> String {
        let stem = self
            .file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(self.file_name.as_str());
        let stem = if stem.is_empty() { "session" } else { stem };
        format!("validation-report-{stem}.md")
    }

    pub fn to_markdown(&self) -> String {
        format!(
            "# Validation Report\n\n\
             - **File:** {file}\n\
             - **Completed:** {completed}\n\
             - **Task:** {description}\n\
             - **Overall Result:** {result}\n\n\
             ## Reasoning and Evidence\n\n{reasoning}\n\n\
             ## Log\n\n```\n{log}\n```\n\n\
             ## Test Case\n\n```\n{test_case}\n```\n",
            file = self.file_name,
            completed = self.completed_at.to_rfc3339(),
            description = self.description,
            result = self.result,
            reasoning = self.reasoning,
            log = self.log_content,
            test_case = self.test_case_content,
        )
    }

    pub fn to_summary(&self) -> String {
        format!(
            "Validation of {file} ({completed}): {result}\n\n{reasoning}",
            file = self.file_name,
            completed = self.completed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            result = self.result,
            reasoning = self.reasoning,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ConfirmationPayload, SessionEvent, transition};

    fn completed_session(reply: &str) -> SessionState {
        let payload =
            ConfirmationPayload::new("checkout.log", "10:00 order=42 PAID", "StepNo: 1 pay").unwrap();
        let state = transition(SessionState::new(), SessionEvent::ConfirmSubmission(payload)).state;
        let task_id = state.tasks[0].id.clone();
        transition(
            state,
            SessionEvent::ValidationFinished {
                task_id,
                outcome: Ok(reply.to_string()),
            },
        )
        .state
    }

    #[test]
    fn test_no_report_before_completion() {
        assert!(ValidationReport::from_session(&SessionState::new()).is_none());
    }

    #[test]
    fn test_markdown_contains_all_sections() {
        let state = completed_session(
            "Overall Result: PASS\nReasoning and Evidence:\n- StepNo 1: order=42 PAID at 10:00",
        );
        let report = ValidationReport::from_session(&state).unwrap();
        let markdown = report.to_markdown();

        assert_eq!(report.result, OverallResult::Pass);
        assert!(markdown.contains("checkout.log"));
        assert!(markdown.contains("**Overall Result:** PASS"));
        assert!(markdown.contains("- StepNo 1: order=42 PAID at 10:00"));
        assert!(markdown.contains("10:00 order=42 PAID"));
        assert!(markdown.contains("StepNo: 1 pay"));
        assert!(markdown.contains("Validate test case against EPS log"));
    }

    #[test]
    fn test_summary_with_unknown_verdict() {
        let state = completed_session("I could not decide.");
        let summary = ValidationReport::from_session(&state).unwrap().to_summary();
        assert!(summary.starts_with("Validation of checkout.log"));
        assert!(summary.contains(": Unknown"));
        assert!(summary.ends_with("I could not decide."));
    }

    #[test]
    fn test_suggested_file_name() {
        let state = completed_session("Overall Result: FAIL");
        let report = ValidationReport::from_session(&state).unwrap();
        assert_eq!(report.suggested_file_name(), "validation-report-checkout.md");
    }
}
