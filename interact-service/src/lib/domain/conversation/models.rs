use std::fmt;
use std::sync::LazyLock;

use chrono::DateTime;
use chrono::Utc;
use regex::Regex;
use serde::Serialize;

use crate::domain::conversation::errors::QueryTextError;
use crate::domain::user::models::UserId;

/// Title given to conversations opened implicitly or by a reset.
pub const DEFAULT_CONVERSATION_TITLE: &str = "New Conversation";

/// Conversation identifier (database assigned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(pub i64);

impl ConversationId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A thread of exchanges owned by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: ConversationId,
    pub user_id: UserId,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One persisted question/answer pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub id: i64,
    pub user_id: UserId,
    pub conversation_id: ConversationId,
    pub query_text: String,
    pub response_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Exchange row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExchange {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
    pub query_text: QueryText,
    pub response_text: String,
}

/// Non-empty user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText(String);

impl QueryText {
    /// # Errors
    /// * `Empty` - Text is empty or only whitespace
    pub fn new(text: String) -> Result<Self, QueryTextError> {
        if text.trim().is_empty() {
            Err(QueryTextError::Empty)
        } else {
            Ok(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to ask a question, optionally within a given conversation.
#[derive(Debug, Clone)]
pub struct AskQueryCommand {
    pub query_text: QueryText,
    pub conversation_id: Option<ConversationId>,
}

/// Answer returned to the caller of an ask.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAnswer {
    pub query: String,
    pub response: String,
    pub conversation_id: ConversationId,
}

/// A conversation with its exchanges, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationHistory {
    pub conversation: Conversation,
    pub exchanges: Vec<Exchange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message of the context sent to the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Build the model context: past exchanges oldest first, then the new query.
pub fn build_prompt(history: &[Exchange], query: &QueryText) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 1);

    for exchange in history {
        messages.push(ChatMessage::user(exchange.query_text.as_str()));
        messages.push(ChatMessage::assistant(exchange.response_text.as_str()));
    }
    messages.push(ChatMessage::user(query.as_str()));

    messages
}

static BOXED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\boxed\{([^}]*)\}").expect("Invalid boxed regex"));

/// Unwrap `\boxed{...}` markup and trim the model reply.
pub fn clean_response_text(text: &str) -> String {
    BOXED_REGEX.replace_all(text, "$1").trim().to_string()
}
