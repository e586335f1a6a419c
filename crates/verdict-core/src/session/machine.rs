//! The session state machine.
//!
//! [`transition`] is a pure function from the current state and an event to
//! the next state plus the effects the controller must run. Model requests
//! never happen here; their results come back as follow-up events.

use chrono::Utc;

use super::app_mode::AppMode;
use super::event::{ConfirmationPayload, Effect, NavigationIntent, Notification, SessionEvent};
use super::model::SessionState;
use crate::detection::contains_test_case;
use crate::error::ModelError;
use crate::task::Task;

pub const TEST_CASE_DETECTED_REPLY: &str = "That looks like a test case. Please upload the log \
file it should be validated against and confirm both to start the validation.";

pub const READY_REPLY: &str =
    "Ready when you are. Upload a log file and a test case to start the next validation.";

pub const REQUEST_FEATURE_REPLY: &str = "Thanks for your interest! Describe the feature you would \
like in a message and it will be considered for a future release.";

pub const PRIVACY_REPLY: &str = "Your logs and test cases stay on this machine. They are only \
sent to the locally hosted model and are discarded when the session ends.";

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: SessionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: SessionState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }
}

/// Applies `event` to `state`.
pub fn transition(state: SessionState, event: SessionEvent) -> Transition {
    match event {
        SessionEvent::SendMessage { text } => send_message(state, text),
        SessionEvent::ChatReplyReceived { outcome } => chat_reply_received(state, outcome),
        SessionEvent::ConfirmSubmission(payload) => confirm_submission(state, payload),
        SessionEvent::ValidationFinished { task_id, outcome } => {
            validation_finished(state, &task_id, outcome)
        }
        SessionEvent::StartNewTask => start_new_task(state),
        SessionEvent::Navigate(intent) => navigate(state, intent),
    }
}

/// Chat apology for a failed model request.
pub fn apology(err: &ModelError) -> String {
    format!(
        "Sorry, I couldn't get a reply from the model ({err}). Please verify that the local \
         model service is running and try again."
    )
}

fn send_message(mut state: SessionState, text: String) -> Transition {
    if state.busy {
        tracing::debug!("[Orchestrator] Ignoring message while a request is in flight");
        return Transition::unchanged(state);
    }
    if text.trim().is_empty() {
        return Transition::unchanged(state);
    }

    state.push_user(text.clone());

    if contains_test_case(&text) {
        tracing::info!("[Orchestrator] Structured test case detected in chat input");
        state.push_assistant(TEST_CASE_DETECTED_REPLY);
        state.show_confirmation = true;
        return Transition::unchanged(state);
    }

    state.busy = true;
    Transition::with(state, vec![Effect::RequestChat { message: text }])
}

fn chat_reply_received(
    mut state: SessionState,
    outcome: Result<String, ModelError>,
) -> Transition {
    if !state.busy {
        tracing::warn!("[Orchestrator] Dropping chat reply with no request in flight");
        return Transition::unchanged(state);
    }
    state.busy = false;

    match outcome {
        Ok(reply) => {
            state.push_assistant(reply);
            Transition::unchanged(state)
        }
        Err(err) => {
            tracing::warn!("[Orchestrator] Chat request failed: {}", err);
            state.push_assistant(apology(&err));
            Transition::with(
                state,
                vec![Effect::Notify(Notification::error(format!(
                    "Failed to get a reply: {err}"
                )))],
            )
        }
    }
}

fn confirm_submission(mut state: SessionState, payload: ConfirmationPayload) -> Transition {
    if state.busy {
        return Transition::with(
            state,
            vec![Effect::Notify(Notification::error(
                "A request is already in progress; wait for it to finish.",
            ))],
        );
    }

    let ConfirmationPayload {
        file_name,
        log_content,
        test_case_content,
    } = payload;

    tracing::info!(
        "[Orchestrator] {} -> {} for '{}'",
        state.mode,
        AppMode::TaskMode,
        file_name
    );

    let task = Task::validation(log_content.clone(), test_case_content.clone());
    let task_id = task.id.clone();

    state.active_file_name = file_name;
    state.show_confirmation = false;
    state.mode = AppMode::TaskMode;
    state.tasks = vec![task];
    state.completed_count = 0;
    let notice = format!(
        "Received '{}' and the test case. Validating the log now...",
        state.active_file_name
    );
    state.push_assistant(notice);
    state.busy = true;

    Transition::with(
        state,
        vec![Effect::RequestValidation {
            task_id,
            log_content,
            test_case_content,
        }],
    )
}

fn validation_finished(
    mut state: SessionState,
    task_id: &str,
    outcome: Result<String, ModelError>,
) -> Transition {
    if !state.busy {
        tracing::warn!("[Orchestrator] Dropping validation result with no request in flight");
        return Transition::unchanged(state);
    }
    let Some(index) = state
        .tasks
        .iter()
        .position(|task| task.id == task_id && !task.completed)
    else {
        tracing::warn!("[Orchestrator] Validation result for unknown task {}", task_id);
        return Transition::unchanged(state);
    };
    let now = Utc::now();

    let (justification, notification) = match &outcome {
        Ok(reply) => (
            reply.clone(),
            Notification::success("Validation completed."),
        ),
        Err(err) => {
            tracing::warn!("[Orchestrator] Validation request failed: {}", err);
            (
                format!("Validation failed: {err}"),
                Notification::error(format!("Validation failed: {err}")),
            )
        }
    };
    state.tasks[index].complete(justification, now);

    state.completed_count = state.tasks.iter().filter(|task| task.completed).count();
    if state.all_tasks_completed() {
        tracing::info!(
            "[Orchestrator] {} -> {}",
            state.mode,
            AppMode::TasksCompleted
        );
        state.mode = AppMode::TasksCompleted;
    }
    state.last_completed_at = now;
    state.busy = false;

    match outcome {
        Ok(reply) => state.push_assistant(reply),
        Err(err) => state.push_assistant(apology(&err)),
    };

    Transition::with(state, vec![Effect::Notify(notification)])
}

fn start_new_task(mut state: SessionState) -> Transition {
    if state.mode != AppMode::TasksCompleted {
        return Transition::with(
            state,
            vec![Effect::Notify(Notification::info(
                "There is no finished validation to clear yet.",
            ))],
        );
    }

    tracing::info!("[Orchestrator] {} -> {}", state.mode, AppMode::Chatting);
    state.tasks.clear();
    state.completed_count = 0;
    state.active_file_name.clear();
    state.last_completed_at = Utc::now();
    state.mode = AppMode::Chatting;
    state.push_assistant(READY_REPLY);
    Transition::unchanged(state)
}

fn navigate(mut state: SessionState, intent: NavigationIntent) -> Transition {
    match intent {
        NavigationIntent::NewTask => {
            state.show_confirmation = true;
            Transition::unchanged(state)
        }
        NavigationIntent::History => {
            let text = format!("This session has {} messages.", state.messages.len());
            Transition::with(state, vec![Effect::Notify(Notification::info(text))])
        }
        NavigationIntent::RequestFeature => {
            state.push_assistant(REQUEST_FEATURE_REPLY);
            Transition::unchanged(state)
        }
        NavigationIntent::Privacy => {
            state.push_assistant(PRIVACY_REPLY);
            Transition::unchanged(state)
        }
    }
}
