//! Error Types

use thiserror::Error;

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Message returned when the completion API reports a failure without details.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "OpenAI request failed";

/// Message returned for every transport, parse or internal failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "AI failed to respond";

/// Chat pipeline error types
#[derive(Error, Debug)]
pub enum ChatError {
    /// Caller sent an unusable request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Completion API answered with a non-success status
    #[error("Upstream error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Upstream {
        status: u16,
        message: Option<String>,
    },

    /// Completion API could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// Completion API answered with a body we could not decode
    #[error("Parse error: {0}")]
    Parse(String),

    /// Context enrichment failed
    #[error("Context error: {0}")]
    Context(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    /// Whether the caller is at fault (maps to a 4xx status)
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }

    /// Convert to the message shown to the caller.
    ///
    /// Internal details never leak: only request validation messages and the
    /// upstream's own error text are passed through.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::Upstream { message, .. } => message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UPSTREAM_FAILURE_MESSAGE.into()),
            _ => GENERIC_FAILURE_MESSAGE.into(),
        }
    }
}
