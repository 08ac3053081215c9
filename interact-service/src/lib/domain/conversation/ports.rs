use async_trait::async_trait;

use crate::domain::conversation::errors::ConversationError;
use crate::domain::conversation::errors::LlmError;
use crate::domain::conversation::models::AskQueryCommand;
use crate::domain::conversation::models::ChatMessage;
use crate::domain::conversation::models::Conversation;
use crate::domain::conversation::models::ConversationHistory;
use crate::domain::conversation::models::ConversationId;
use crate::domain::conversation::models::Exchange;
use crate::domain::conversation::models::NewExchange;
use crate::domain::conversation::models::QueryAnswer;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for conversation domain service operations.
///
/// Every operation acts on behalf of an already authenticated user.
#[async_trait]
pub trait ConversationServicePort: Send + Sync + 'static {
    /// Forward a query with its conversation context to the model and
    /// persist the exchange.
    ///
    /// Without an explicit conversation the user's active one is used; if
    /// there is none a new conversation is opened and made active.
    ///
    /// # Errors
    /// * `NotFound` - Explicit conversation is missing or owned by someone else
    /// * `Llm` - Model call failed; nothing is persisted
    /// * `DatabaseError` - Database operation failed
    async fn ask(&self, user: &User, command: AskQueryCommand)
        -> Result<QueryAnswer, ConversationError>;

    /// Open a fresh conversation and make it the active one.
    async fn reset(&self, user: &User) -> Result<Conversation, ConversationError>;

    /// All conversations of the user, most recently updated first, each
    /// with its exchanges most recently updated first.
    async fn history(&self, user: &User) -> Result<Vec<ConversationHistory>, ConversationError>;

    /// Delete a conversation and its exchanges.
    ///
    /// # Errors
    /// * `NotFound` - Conversation is missing or owned by someone else
    async fn delete_conversation(
        &self,
        user: &User,
        id: ConversationId,
    ) -> Result<(), ConversationError>;
}

/// Persistence operations for conversations and their exchanges.
#[async_trait]
pub trait ConversationRepository: Send + Sync + 'static {
    /// Insert a new conversation for `user_id`.
    async fn create(
        &self,
        user_id: UserId,
        title: &str,
    ) -> Result<Conversation, ConversationError>;

    /// Conversation `id` if it belongs to `user_id`.
    async fn find_for_user(
        &self,
        id: ConversationId,
        user_id: UserId,
    ) -> Result<Option<Conversation>, ConversationError>;

    /// All conversations of `user_id`, `updated_at` descending.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Conversation>, ConversationError>;

    /// Point the user's active conversation at `id` (or clear it).
    async fn set_active(
        &self,
        user_id: UserId,
        id: Option<ConversationId>,
    ) -> Result<(), ConversationError>;

    /// Bump the conversation's `updated_at`.
    async fn touch(&self, id: ConversationId) -> Result<(), ConversationError>;

    /// Delete conversation `id` of `user_id` with its exchanges.
    ///
    /// # Returns
    /// False when nothing matched
    async fn delete(&self, id: ConversationId, user_id: UserId)
        -> Result<bool, ConversationError>;

    /// Exchanges of a conversation, `created_at` ascending.
    async fn exchanges(&self, id: ConversationId) -> Result<Vec<Exchange>, ConversationError>;

    /// Persist one question/answer pair.
    async fn save_exchange(&self, exchange: NewExchange) -> Result<Exchange, ConversationError>;
}

/// Text-in, text-out language model.
#[async_trait]
pub trait LlmClient: Send + Sync + 'static {
    /// Send the conversation context and return the raw reply text.
    ///
    /// # Errors
    /// * `RequestFailed` - Transport failure or timeout
    /// * `Status` - Non-success HTTP status
    /// * `InvalidResponse` - Reply body lacks `choices[0].message.content`
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}
