use thiserror::Error;

use crate::domain::conversation::models::ConversationId;

/// Error for QueryText validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryTextError {
    #[error("Query text is empty")]
    Empty,
}

/// Failures of the outbound language model call.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Top-level error type for conversation operations
#[derive(Debug, Clone, Error)]
pub enum ConversationError {
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryTextError),

    #[error("Conversation not found: {0}")]
    NotFound(ConversationId),

    #[error("LLM API error: {0}")]
    Llm(#[from] LlmError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ConversationError {
    fn from(err: anyhow::Error) -> Self {
        ConversationError::Unknown(err.to_string())
    }
}
