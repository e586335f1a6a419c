//! Error types for the verdict application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure talking to the local model endpoint.
///
/// Cloneable so that a failed request can be fed back into the state machine
/// as part of a follow-up event.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("model endpoint returned HTTP {status}")]
    Transport { status: u16 },

    /// The endpoint could not be reached at all (DNS, refused, timeout).
    #[error("could not reach model endpoint: {message}")]
    Connectivity { message: String },
}

impl ModelError {
    /// Creates a Connectivity error
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity {
            message: message.into(),
        }
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a Connectivity error
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }
}

/// A shared error type for the entire verdict application.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum VerdictError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A confirmation form submission was rejected before reaching the orchestrator
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    /// Report export error
    #[error("Export error: {0}")]
    Export(String),

    /// Model endpoint error
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl VerdictError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidSubmission error
    pub fn invalid_submission(message: impl Into<String>) -> Self {
        Self::InvalidSubmission(message.into())
    }

    /// Creates an Export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a rejected form submission
    pub fn is_invalid_submission(&self) -> bool {
        matches!(self, Self::InvalidSubmission(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for VerdictError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for VerdictError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for VerdictError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for VerdictError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, VerdictError>`.
pub type Result<T> = std::result::Result<T, VerdictError>;
