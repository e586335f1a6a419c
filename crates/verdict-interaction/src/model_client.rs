//! Model client abstraction and reply extraction shared by all clients.

use async_trait::async_trait;
use serde_json::Value;
use verdict_core::ModelError;
use verdict_core::prompt::prepare_prompt;

/// Reply used when a successful response carries no recognised reply field.
pub const NO_REPLY_FALLBACK: &str = "No reply from model";

/// A chat request to the model.
///
/// When both `log_content` and `test_case_content` are present the prompt is
/// the validation prompt built from them; otherwise `message` is sent as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub log_content: Option<String>,
    pub test_case_content: Option<String>,
}

impl ChatRequest {
    /// A free-text chat request.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            log_content: None,
            test_case_content: None,
        }
    }

    /// A validation request with no free-text message.
    pub fn validation(log_content: impl Into<String>, test_case_content: impl Into<String>) -> Self {
        Self {
            message: String::new(),
            log_content: Some(log_content.into()),
            test_case_content: Some(test_case_content.into()),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.log_content.is_some() && self.test_case_content.is_some()
    }

    /// Renders the prompt, capping each validation input at `max_content_length`.
    pub fn prompt(&self, max_content_length: usize) -> String {
        prepare_prompt(
            &self.message,
            self.log_content.as_deref(),
            self.test_case_content.as_deref(),
            max_content_length,
        )
    }
}

/// Sends chat requests to a language model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Sends one request and returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Transport` for a non-success status and
    /// `ModelError::Connectivity` when the endpoint cannot be reached. A
    /// success response never fails, whatever its body.
    async fn send_chat(&self, request: ChatRequest) -> Result<String, ModelError>;
}

/// Extracts the reply text from a response body.
///
/// Checks `message.content`, then `content`, then
/// `choices[0].message.content`, falling back to [`NO_REPLY_FALLBACK`].
pub fn extract_reply(body: &Value) -> String {
    body.pointer("/message/content")
        .and_then(Value::as_str)
        .or_else(|| body.get("content").and_then(Value::as_str))
        .or_else(|| body.pointer("/choices/0/message/content").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_reply_prefers_nested_message() {
        let body = json!({
            "message": {"role": "assistant", "content": "nested"},
            "content": "top-level"
        });
        assert_eq!(extract_reply(&body), "nested");
    }

    #[test]
    fn test_extract_reply_top_level_content() {
        assert_eq!(extract_reply(&json!({"content": "top-level"})), "top-level");
    }

    #[test]
    fn test_extract_reply_choices_shape() {
        let body = json!({"choices": [{"message": {"content": "from choices"}}]});
        assert_eq!(extract_reply(&body), "from choices");
    }

    #[test]
    fn test_extract_reply_falls_back() {
        assert_eq!(extract_reply(&json!({"done": true})), NO_REPLY_FALLBACK);
        assert_eq!(extract_reply(&json!({"content": 42})), NO_REPLY_FALLBACK);
        assert_eq!(extract_reply(&Value::Null), NO_REPLY_FALLBACK);
    }

    #[test]
    fn test_request_prompt_selection() {
        assert_eq!(ChatRequest::message("hi").prompt(100), "hi");

        let request = ChatRequest::validation("the log", "the case");
        assert!(request.is_validation());
        let prompt = request.prompt(100);
        assert!(prompt.contains("the log"));
        assert!(prompt.contains("the case"));
    }
}
