//! ScriptedModelClient - in-process stand-in for the model endpoint.
//!
//! Replies are queued as raw response bodies and go through the same reply
//! extraction as the HTTP client. When the queue is empty a canned reply is
//! produced, which is what the `--offline` mode of the REPL relies on.

use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use verdict_core::ModelError;

use crate::model_client::{ChatRequest, ModelClient, extract_reply};

/// Reply produced for a validation request when nothing is queued.
///
/// Carries no verdict line, so the result extracts as unknown.
pub const OFFLINE_VALIDATION_REPLY: &str = "Offline mode: no model was contacted and the log \
was not inspected.\nReasoning and Evidence:\n- No verdict is available without a model.";

#[derive(Default)]
pub struct ScriptedModelClient {
    responses: Mutex<VecDeque<Result<Value, ModelError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModelClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply in the `choices[0].message.content` shape.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        let reply = reply.into();
        self.with_body(json!({ "choices": [{ "message": { "content": reply } }] }))
    }

    /// Queues a raw response body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.responses.get_mut().push_back(Ok(body));
        self
    }

    /// Queues a failure.
    pub fn with_error(mut self, err: ModelError) -> Self {
        self.responses.get_mut().push_back(Err(err));
        self
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    fn canned_body(request: &ChatRequest) -> Value {
        let content = if request.is_validation() {
            OFFLINE_VALIDATION_REPLY.to_string()
        } else {
            format!("(offline) You said: {}", request.message)
        };
        json!({ "choices": [{ "message": { "content": content } }] })
    }
}

#[async_trait]
impl ModelClient for ScriptedModelClient {
    async fn send_chat(&self, request: ChatRequest) -> Result<String, ModelError> {
        let outcome = match self.responses.lock().await.pop_front() {
            Some(scripted) => scripted,
            None => Ok(Self::canned_body(&request)),
        };
        self.requests.lock().await.push(request);
        outcome.map(|body| extract_reply(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_client::NO_REPLY_FALLBACK;
    use verdict_core::verdict::{OverallResult, extract_overall_result};

    #[tokio::test]
    async fn test_replies_are_served_in_order() {
        let client = ScriptedModelClient::new()
            .with_reply("first")
            .with_error(ModelError::Transport { status: 500 })
            .with_body(json!({ "unexpected": true }));

        assert_eq!(client.send_chat(ChatRequest::message("a")).await.unwrap(), "first");
        assert_eq!(
            client.send_chat(ChatRequest::message("b")).await,
            Err(ModelError::Transport { status: 500 })
        );
        assert_eq!(
            client.send_chat(ChatRequest::message("c")).await.unwrap(),
            NO_REPLY_FALLBACK
        );
        assert_eq!(client.request_count().await, 3);
    }

    #[tokio::test]
    async fn test_canned_replies_when_queue_is_empty() {
        let client = ScriptedModelClient::new();
        let chat = client.send_chat(ChatRequest::message("ping")).await.unwrap();
        assert_eq!(chat, "(offline) You said: ping");

        let validation = client
            .send_chat(ChatRequest::validation("log", "case"))
            .await
            .unwrap();
        assert_eq!(validation, OFFLINE_VALIDATION_REPLY);
        assert_eq!(extract_overall_result(&validation), OverallResult::Unknown);

        let requests = client.requests().await;
        assert!(requests[1].is_validation());
    }
}
