//! Configuration model for the verdict application.
//!
//! The root configuration is stored as TOML (`config.toml`); every field falls
//! back to its default so a partial or empty file is valid.

use serde::{Deserialize, Serialize};

use crate::prompt::DEFAULT_MAX_CONTENT_LENGTH;

/// Default local chat endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/chat";

/// Default model identifier sent with every request.
pub const DEFAULT_MODEL: &str = "llama3";

/// Settings for the local model endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
    /// Full URL of the chat endpoint (address and path).
    pub endpoint: String,
    /// Model identifier placed in the request body.
    pub model: String,
    /// Per-input character cap applied before building a validation prompt.
    pub max_content_length: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RootConfig {
    #[serde(default)]
    pub model: ModelConfig,
}
