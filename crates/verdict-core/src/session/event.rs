use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result, VerdictError};

/// File name, log text and test-case text submitted through the
/// confirmation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationPayload {
    pub file_name: String,
    pub log_content: String,
    pub test_case_content: String,
}

impl ConfirmationPayload {
    /// Validates a form submission.
    ///
    /// # Errors
    ///
    /// Returns `VerdictError::InvalidSubmission` when the log or the test case
    /// is empty or whitespace only.
    pub fn new(
        file_name: impl Into<String>,
        log_content: impl Into<String>,
        test_case_content: impl Into<String>,
    ) -> Result<Self> {
        let payload = Self {
            file_name: file_name.into(),
            log_content: log_content.into(),
            test_case_content: test_case_content.into(),
        };

        if payload.log_content.trim().is_empty() {
            return Err(VerdictError::invalid_submission(format!(
                "the log file '{}' is empty",
                payload.file_name
            )));
        }
        if payload.test_case_content.trim().is_empty() {
            return Err(VerdictError::invalid_submission("the test case is empty"));
        }

        Ok(payload)
    }
}

/// Sidebar navigation intents, handled regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationIntent {
    NewTask,
    History,
    RequestFeature,
    Privacy,
}

impl NavigationIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewTask => "new-task",
            Self::History => "history",
            Self::RequestFeature => "request-feature",
            Self::Privacy => "privacy",
        }
    }
}

impl fmt::Display for NavigationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NavigationIntent {
    type Err = VerdictError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new-task" => Ok(Self::NewTask),
            "history" => Ok(Self::History),
            "request-feature" => Ok(Self::RequestFeature),
            "privacy" => Ok(Self::Privacy),
            other => Err(VerdictError::invalid_submission(format!(
                "unknown navigation intent '{other}'"
            ))),
        }
    }
}

/// Inputs to the session state machine.
///
/// User intents and the results of model requests both arrive as events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Free-text chat input.
    SendMessage { text: String },
    /// Result of a chat request issued for a `SendMessage`.
    ChatReplyReceived {
        outcome: std::result::Result<String, ModelError>,
    },
    /// The confirmation form was submitted.
    ConfirmSubmission(ConfirmationPayload),
    /// Result of the validation request for a task.
    ValidationFinished {
        task_id: String,
        outcome: std::result::Result<String, ModelError>,
    },
    /// Leave `TasksCompleted` and return to chatting.
    StartNewTask,
    Navigate(NavigationIntent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Toast-style message for the user, outside the chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: text.into(),
        }
    }
}

/// Side effects requested by a transition, executed by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the message verbatim to the model.
    RequestChat { message: String },
    /// Send the task's log and test case through the validation prompt.
    RequestValidation {
        task_id: String,
        log_content: String,
        test_case_content: String,
    },
    Notify(Notification),
}
