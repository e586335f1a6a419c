use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use verdict_core::ModelError;
use verdict_core::session::{
    AppMode, ConfirmationPayload, NavigationIntent, NotificationLevel, READY_REPLY,
};
use verdict_core::verdict::OverallResult;
use verdict_interaction::{ChatRequest, ModelClient, Orchestrator, ScriptedModelClient};

const LOG: &str = "2024-05-01T10:00:01Z INFO order=42 created\n\
2024-05-01T10:00:03Z INFO order=42 status=PAID txn=abc-123";
const TEST_CASE: &str = "{TestCaseID: \"TC-7\"}\nStepNo: 1 Create order\nStepNo: 2 Pay order";

fn checkout_payload() -> ConfirmationPayload {
    ConfirmationPayload::new("checkout.log", LOG, TEST_CASE).expect("valid payload")
}

/// Holds every request until released.
struct GatedClient {
    gate: Arc<Notify>,
    calls: AtomicUsize,
}

#[async_trait]
impl ModelClient for GatedClient {
    async fn send_chat(&self, _request: ChatRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok("late reply".to_string())
    }
}

#[tokio::test]
async fn test_confirm_runs_validation_to_completion() {
    let reply = "Step 1 created at 10:00:01.\nOverall Result: PASS\nReasoning and Evidence:\n\
- StepNo 1: order=42 created\n- StepNo 2: txn=abc-123 PAID";
    let client = Arc::new(ScriptedModelClient::new().with_reply(reply));
    let orchestrator = Orchestrator::new(client.clone());

    let notifications = orchestrator.confirm_submission(checkout_payload()).await;
    let state = orchestrator.snapshot().await;

    assert_eq!(state.mode, AppMode::TasksCompleted);
    assert_eq!(state.tasks.len(), 1);
    assert!(state.tasks[0].completed);
    assert_eq!(state.completed_count, 1);
    assert_eq!(state.active_file_name, "checkout.log");
    assert!(!state.busy);
    assert!(state.mode_is_consistent());
    assert_eq!(state.messages.last().map(|m| m.content.as_str()), Some(reply));

    let verdict = state.tasks[0].verdict().expect("completed task has a verdict");
    assert_eq!(verdict.result, OverallResult::Pass);
    assert!(verdict.reasoning.starts_with("- StepNo 1"));

    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Success);

    let requests = client.requests().await;
    assert_eq!(requests, vec![ChatRequest::validation(LOG, TEST_CASE)]);
    assert!(requests[0].message.is_empty());
}

#[tokio::test]
async fn test_validation_connectivity_failure_still_completes() {
    let client = Arc::new(
        ScriptedModelClient::new().with_error(ModelError::connectivity("connection refused")),
    );
    let orchestrator = Orchestrator::new(client);

    let notifications = orchestrator.confirm_submission(checkout_payload()).await;
    let state = orchestrator.snapshot().await;

    assert_eq!(state.mode, AppMode::TasksCompleted);
    assert_eq!(state.completed_count, 1);
    let justification = state.tasks[0].justification.as_deref().unwrap_or_default();
    assert!(justification.contains("Validation failed"));
    assert_eq!(
        state.tasks[0].verdict().map(|v| v.result),
        Some(OverallResult::Unknown)
    );
    assert!(!state.busy);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn test_chat_transport_failure_appends_apology() {
    let client = Arc::new(ScriptedModelClient::new().with_error(ModelError::Transport { status: 502 }));
    let orchestrator = Orchestrator::new(client);

    let notifications = orchestrator.send_message("summarise the last error").await;
    let state = orchestrator.snapshot().await;

    assert!(!state.busy);
    let last = state.messages.last().expect("apology appended");
    assert!(last.content.starts_with("Sorry"));
    assert!(last.content.contains("502"));
    assert_eq!(notifications[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn test_send_while_busy_is_rejected() {
    let gate = Arc::new(Notify::new());
    let client = Arc::new(GatedClient {
        gate: gate.clone(),
        calls: AtomicUsize::new(0),
    });
    let orchestrator = Orchestrator::new(client.clone());

    let first = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.send_message("first").await })
    };

    while !orchestrator.snapshot().await.busy {
        tokio::task::yield_now().await;
    }
    let before = orchestrator.snapshot().await.messages.len();

    let notifications = orchestrator.send_message("second").await;

    assert!(notifications.is_empty());
    assert_eq!(orchestrator.snapshot().await.messages.len(), before);
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);

    gate.notify_one();
    first.await.expect("first send completes");

    let state = orchestrator.snapshot().await;
    assert!(!state.busy);
    assert_eq!(state.messages.len(), before + 1);
    assert_eq!(state.messages[before].content, "late reply");
}

#[tokio::test]
async fn test_abandoned_chat_request_releases_busy() {
    let client = Arc::new(GatedClient {
        gate: Arc::new(Notify::new()),
        calls: AtomicUsize::new(0),
    });
    let orchestrator = Orchestrator::new(client.clone());

    let timed_out = tokio::time::timeout(
        Duration::from_millis(50),
        orchestrator.send_message("hello"),
    )
    .await;
    assert!(timed_out.is_err());

    let state = orchestrator.snapshot().await;
    assert!(!state.busy);
    let last = state.messages.last().expect("apology appended");
    assert!(last.content.starts_with("Sorry"));
    assert!(last.content.contains("abandoned"));

    // The session accepts the next message.
    let next = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.send_message("again").await })
    };
    while client.calls.load(Ordering::SeqCst) < 2 {
        tokio::task::yield_now().await;
    }
    assert!(orchestrator.snapshot().await.busy);
    client.gate.notify_one();
    next.await.expect("second send completes");
    assert!(!orchestrator.snapshot().await.busy);
}

#[tokio::test]
async fn test_abandoned_validation_still_completes_task() {
    let client = Arc::new(GatedClient {
        gate: Arc::new(Notify::new()),
        calls: AtomicUsize::new(0),
    });
    let orchestrator = Orchestrator::new(client);

    let timed_out = tokio::time::timeout(
        Duration::from_millis(50),
        orchestrator.confirm_submission(checkout_payload()),
    )
    .await;
    assert!(timed_out.is_err());

    let state = orchestrator.snapshot().await;
    assert!(!state.busy);
    assert_eq!(state.mode, AppMode::TasksCompleted);
    assert_eq!(state.completed_count, 1);
    let justification = state.tasks[0].justification.as_deref().unwrap_or_default();
    assert!(justification.contains("Validation failed"));
}

#[tokio::test]
async fn test_start_new_task_returns_to_chatting() {
    let client = Arc::new(ScriptedModelClient::new().with_reply("Overall Result: FAIL"));
    let orchestrator = Orchestrator::new(client);

    orchestrator.confirm_submission(checkout_payload()).await;
    let completed_at = orchestrator.snapshot().await.last_completed_at;
    orchestrator.start_new_task().await;
    let state = orchestrator.snapshot().await;

    assert!(state.tasks.is_empty());
    assert_eq!(state.completed_count, 0);
    assert!(state.active_file_name.is_empty());
    assert_eq!(state.mode, AppMode::Chatting);
    assert!(state.last_completed_at >= completed_at);
    assert_eq!(state.messages.last().map(|m| m.content.as_str()), Some(READY_REPLY));
}

#[tokio::test]
async fn test_new_task_after_completion_replaces_task() {
    let client = Arc::new(
        ScriptedModelClient::new()
            .with_reply("Overall Result: FAIL")
            .with_reply("Overall Result: PASS"),
    );
    let orchestrator = Orchestrator::new(client);

    orchestrator.confirm_submission(checkout_payload()).await;
    let first_id = orchestrator.snapshot().await.tasks[0].id.clone();

    orchestrator.navigate(NavigationIntent::NewTask).await;
    assert!(orchestrator.snapshot().await.show_confirmation);

    let payload = ConfirmationPayload::new("refund.log", "refund ok", "StepNo: 1 refund")
        .expect("valid payload");
    orchestrator.confirm_submission(payload).await;
    let state = orchestrator.snapshot().await;

    assert_eq!(state.tasks.len(), 1);
    assert_ne!(state.tasks[0].id, first_id);
    assert_eq!(state.active_file_name, "refund.log");
    assert_eq!(state.mode, AppMode::TasksCompleted);
    assert_eq!(
        state.tasks[0].verdict().map(|v| v.result),
        Some(OverallResult::Pass)
    );
}

#[tokio::test]
async fn test_history_is_read_only() {
    let orchestrator = Orchestrator::new(Arc::new(ScriptedModelClient::new()));
    let before = orchestrator.snapshot().await;

    let notifications = orchestrator.navigate(NavigationIntent::History).await;

    assert_eq!(orchestrator.snapshot().await, before);
    assert_eq!(notifications[0].text, "This session has 1 messages.");
}
