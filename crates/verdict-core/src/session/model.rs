//! Session state model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::app_mode::AppMode;
use super::message::{Message, MessageRole};
use crate::task::Task;

/// Greeting placed at the top of every new session.
pub const GREETING: &str = "Hello! Ask me anything, or paste a test case and upload the matching \
log file to validate it.";

/// In-memory state of one session.
///
/// Owned by a single controller. Presentation code only ever sees clones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: AppMode,
    pub messages: Vec<Message>,
    pub tasks: Vec<Task>,
    pub completed_count: usize,
    /// Name of the file under validation; empty when none.
    pub active_file_name: String,
    /// True while exactly one model request is outstanding.
    pub busy: bool,
    pub last_completed_at: DateTime<Utc>,
    /// Whether the file/test-case confirmation form is shown.
    pub show_confirmation: bool,
    next_message_id: u64,
}

impl SessionState {
    /// Creates a fresh session holding only the greeting.
    pub fn new() -> Self {
        let mut state = Self {
            last_completed_at: Utc::now(),
            ..Self::default()
        };
        state.push_message(MessageRole::Assistant, GREETING);
        state
    }

    /// Appends a message and returns it.
    pub fn push_message(&mut self, role: MessageRole, content: impl Into<String>) -> &Message {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(Message {
            id,
            role,
            content: content.into(),
            created_at: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &Message {
        self.push_message(MessageRole::User, content)
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Message {
        self.push_message(MessageRole::Assistant, content)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// The first completed task, if any.
    pub fn completed_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|task| task.completed)
    }

    pub fn all_tasks_completed(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|task| task.completed)
    }

    /// Checks that `mode` agrees with the task collection.
    pub fn mode_is_consistent(&self) -> bool {
        match self.mode {
            AppMode::Chatting => self.tasks.is_empty(),
            AppMode::TaskMode => !self.tasks.is_empty() && !self.all_tasks_completed(),
            AppMode::TasksCompleted => self.all_tasks_completed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_chatting_with_greeting() {
        let state = SessionState::new();
        assert_eq!(state.mode, AppMode::Chatting);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].content, GREETING);
        assert!(!state.busy);
        assert!(state.mode_is_consistent());
    }

    #[test]
    fn test_message_ids_follow_creation_order() {
        let mut state = SessionState::new();
        state.push_user("one");
        state.push_assistant("two");

        let ids: Vec<u64> = state.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(state.messages[1].is_user());
    }

    #[test]
    fn test_mode_consistency() {
        let mut state = SessionState::new();
        state.tasks.push(Task::validation("log", "case"));
        assert!(!state.mode_is_consistent());

        state.mode = AppMode::TaskMode;
        assert!(state.mode_is_consistent());

        state.tasks[0].complete("done", Utc::now());
        assert!(!state.mode_is_consistent());

        state.mode = AppMode::TasksCompleted;
        assert!(state.mode_is_consistent());
        assert!(state.completed_task().is_some());
    }
}
