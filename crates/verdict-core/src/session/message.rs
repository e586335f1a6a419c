//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the model or the application speaking on its behalf.
    Assistant,
}

/// A single message in the session log.
///
/// Messages are immutable once created. Identifiers increase in creation
/// order within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}
