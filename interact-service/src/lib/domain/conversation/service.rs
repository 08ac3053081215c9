use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::conversation::errors::ConversationError;
use crate::domain::conversation::models::build_prompt;
use crate::domain::conversation::models::clean_response_text;
use crate::domain::conversation::models::AskQueryCommand;
use crate::domain::conversation::models::Conversation;
use crate::domain::conversation::models::ConversationHistory;
use crate::domain::conversation::models::ConversationId;
use crate::domain::conversation::models::NewExchange;
use crate::domain::conversation::models::QueryAnswer;
use crate::domain::conversation::models::DEFAULT_CONVERSATION_TITLE;
use crate::domain::conversation::ports::ConversationRepository;
use crate::domain::conversation::ports::ConversationServicePort;
use crate::domain::conversation::ports::LlmClient;
use crate::domain::user::models::User;

/// Concrete implementation of ConversationServicePort.
pub struct ConversationService<CR, LC>
where
    CR: ConversationRepository,
    LC: LlmClient,
{
    repository: Arc<CR>,
    llm_client: Arc<LC>,
}

impl<CR, LC> ConversationService<CR, LC>
where
    CR: ConversationRepository,
    LC: LlmClient,
{
    /// Create a new conversation service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Conversation and exchange persistence
    /// * `llm_client` - Language model adapter
    pub fn new(repository: Arc<CR>, llm_client: Arc<LC>) -> Self {
        Self {
            repository,
            llm_client,
        }
    }

    async fn open_active_conversation(&self, user: &User) -> Result<Conversation, ConversationError> {
        let conversation = self
            .repository
            .create(user.id, DEFAULT_CONVERSATION_TITLE)
            .await?;
        self.repository
            .set_active(user.id, Some(conversation.id))
            .await?;

        tracing::debug!(
            user_id = %user.id,
            conversation_id = %conversation.id,
            "Opened new active conversation"
        );

        Ok(conversation)
    }

    async fn resolve_conversation(
        &self,
        user: &User,
        requested: Option<ConversationId>,
    ) -> Result<ConversationId, ConversationError> {
        if let Some(id) = requested {
            return self
                .repository
                .find_for_user(id, user.id)
                .await?
                .map(|conversation| conversation.id)
                .ok_or(ConversationError::NotFound(id));
        }

        if let Some(active) = user.active_conversation_id {
            if let Some(conversation) = self.repository.find_for_user(active, user.id).await? {
                return Ok(conversation.id);
            }
        }

        Ok(self.open_active_conversation(user).await?.id)
    }
}

#[async_trait]
impl<CR, LC> ConversationServicePort for ConversationService<CR, LC>
where
    CR: ConversationRepository,
    LC: LlmClient,
{
    async fn ask(
        &self,
        user: &User,
        command: AskQueryCommand,
    ) -> Result<QueryAnswer, ConversationError> {
        let conversation_id = self
            .resolve_conversation(user, command.conversation_id)
            .await?;

        let history = self.repository.exchanges(conversation_id).await?;
        let messages = build_prompt(&history, &command.query_text);

        let raw_response = self.llm_client.complete(&messages).await.map_err(|e| {
            tracing::error!(
                user_id = %user.id,
                conversation_id = %conversation_id,
                error = %e,
                "LLM call failed"
            );
            ConversationError::from(e)
        })?;
        let response = clean_response_text(&raw_response);

        let query = command.query_text.as_str().to_string();
        self.repository
            .save_exchange(NewExchange {
                user_id: user.id,
                conversation_id,
                query_text: command.query_text,
                response_text: response.clone(),
            })
            .await?;
        self.repository.touch(conversation_id).await?;

        Ok(QueryAnswer {
            query,
            response,
            conversation_id,
        })
    }

    async fn reset(&self, user: &User) -> Result<Conversation, ConversationError> {
        self.open_active_conversation(user).await
    }

    async fn history(&self, user: &User) -> Result<Vec<ConversationHistory>, ConversationError> {
        let conversations = self.repository.list_for_user(user.id).await?;

        let mut history = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            let mut exchanges = self.repository.exchanges(conversation.id).await?;
            exchanges.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            history.push(ConversationHistory {
                conversation,
                exchanges,
            });
        }

        Ok(history)
    }

    async fn delete_conversation(
        &self,
        user: &User,
        id: ConversationId,
    ) -> Result<(), ConversationError> {
        if !self.repository.delete(id, user.id).await? {
            return Err(ConversationError::NotFound(id));
        }

        if user.active_conversation_id == Some(id) {
            self.repository.set_active(user.id, None).await?;
        }

        tracing::info!(user_id = %user.id, conversation_id = %id, "Conversation deleted");

        Ok(())
    }
}
