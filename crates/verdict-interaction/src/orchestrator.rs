//! The orchestrator: owns the session state and runs the effects requested by
//! the state machine.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::RwLock;
use verdict_core::ModelError;
use verdict_core::session::{
    ConfirmationPayload, Effect, NavigationIntent, Notification, SessionEvent, SessionState,
    Transition, transition,
};

use crate::model_client::{ChatRequest, ModelClient};

/// Controller for one session.
///
/// The state lock is held only while a transition is applied, never across
/// a model request, so the busy flag is observable while a request is in
/// flight and concurrent sends are rejected by the state machine.
#[derive(Clone)]
pub struct Orchestrator {
    state: Arc<RwLock<SessionState>>,
    client: Arc<dyn ModelClient>,
}

impl Orchestrator {
    /// Creates an orchestrator with a fresh session.
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self::with_state(SessionState::new(), client)
    }

    pub fn with_state(state: SessionState, client: Arc<dyn ModelClient>) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            client,
        }
    }

    /// Read-only copy of the current state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn send_message(&self, text: impl Into<String>) -> Vec<Notification> {
        self.dispatch(SessionEvent::SendMessage { text: text.into() })
            .await
    }

    /// Confirms a file and test case; validation starts immediately.
    pub async fn confirm_submission(&self, payload: ConfirmationPayload) -> Vec<Notification> {
        self.dispatch(SessionEvent::ConfirmSubmission(payload)).await
    }

    pub async fn start_new_task(&self) -> Vec<Notification> {
        self.dispatch(SessionEvent::StartNewTask).await
    }

    pub async fn navigate(&self, intent: NavigationIntent) -> Vec<Notification> {
        self.dispatch(SessionEvent::Navigate(intent)).await
    }

    /// Applies `event` and every follow-up event produced by its effects.
    ///
    /// Returns the notifications raised along the way.
    async fn dispatch(&self, event: SessionEvent) -> Vec<Notification> {
        let mut notifications = Vec::new();
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            for effect in self.apply(event).await {
                match effect {
                    Effect::Notify(notification) => notifications.push(notification),
                    Effect::RequestChat { message } => {
                        let in_flight = InFlight::new(
                            &self.state,
                            SessionEvent::ChatReplyReceived {
                                outcome: Err(abandoned()),
                            },
                        );
                        let outcome = self.client.send_chat(ChatRequest::message(message)).await;
                        in_flight.finish();
                        pending.push_back(SessionEvent::ChatReplyReceived { outcome });
                    }
                    Effect::RequestValidation {
                        task_id,
                        log_content,
                        test_case_content,
                    } => {
                        let in_flight = InFlight::new(
                            &self.state,
                            SessionEvent::ValidationFinished {
                                task_id: task_id.clone(),
                                outcome: Err(abandoned()),
                            },
                        );
                        let outcome = self
                            .client
                            .send_chat(ChatRequest::validation(log_content, test_case_content))
                            .await;
                        in_flight.finish();
                        pending.push_back(SessionEvent::ValidationFinished { task_id, outcome });
                    }
                }
            }
        }

        notifications
    }

    async fn apply(&self, event: SessionEvent) -> Vec<Effect> {
        let mut guard = self.state.write().await;
        let current = std::mem::take(&mut *guard);
        let Transition { state, effects } = transition(current, event);
        *guard = state;
        effects
    }
}

fn abandoned() -> ModelError {
    ModelError::connectivity("request abandoned before the model replied")
}

/// Tracks one outstanding model request.
///
/// If the dispatching future is dropped before the reply arrives, the
/// failure event is applied so the session does not stay busy.
struct InFlight {
    state: Arc<RwLock<SessionState>>,
    on_abandon: Option<SessionEvent>,
}

impl InFlight {
    fn new(state: &Arc<RwLock<SessionState>>, on_abandon: SessionEvent) -> Self {
        Self {
            state: Arc::clone(state),
            on_abandon: Some(on_abandon),
        }
    }

    fn finish(mut self) {
        self.on_abandon = None;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let Some(event) = self.on_abandon.take() else {
            return;
        };
        tracing::warn!("[Orchestrator] Model request abandoned; releasing the session");

        match self.state.try_write() {
            Ok(mut guard) => {
                let current = std::mem::take(&mut *guard);
                *guard = transition(current, event).state;
            }
            Err(_) => {
                let state = Arc::clone(&self.state);
                match Handle::try_current() {
                    Ok(handle) => {
                        handle.spawn(async move {
                            let mut guard = state.write().await;
                            let current = std::mem::take(&mut *guard);
                            *guard = transition(current, event).state;
                        });
                    }
                    Err(_) => {
                        tracing::error!("[Orchestrator] No runtime to release the session")
                    }
                }
            }
        }
    }
}
