//! LocalModelClient - REST implementation for a locally hosted chat model.
//!
//! Issues a single non-streaming POST per request. No retry is attempted and
//! no timeout is set beyond what the HTTP stack applies by default.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use verdict_core::ModelError;
use verdict_core::config::ModelConfig;

use crate::model_client::{ChatRequest, ModelClient, extract_reply};

/// Model client that talks to the local chat endpoint over HTTP.
#[derive(Clone)]
pub struct LocalModelClient {
    client: Client,
    config: ModelConfig,
}

impl LocalModelClient {
    /// Creates a client for the configured endpoint and model.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Uses an existing `reqwest::Client`.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, ModelError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!("[ModelClient] Request to {} failed: {}", self.config.endpoint, err);
                ModelError::connectivity(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("[ModelClient] Endpoint returned HTTP {}", status.as_u16());
            return Err(ModelError::Transport {
                status: status.as_u16(),
            });
        }

        // A success status never fails: unreadable or non-JSON bodies fall
        // through to the placeholder reply.
        let text = response.text().await.unwrap_or_default();
        let parsed: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok(extract_reply(&parsed))
    }
}

#[async_trait]
impl ModelClient for LocalModelClient {
    async fn send_chat(&self, request: ChatRequest) -> Result<String, ModelError> {
        let prompt = request.prompt(self.config.max_content_length);
        tracing::info!(
            "[ModelClient] Sending {} request ({} chars) to model '{}'",
            if request.is_validation() { "validation" } else { "chat" },
            prompt.chars().count(),
            self.config.model
        );

        let body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            stream: false,
        };

        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}
