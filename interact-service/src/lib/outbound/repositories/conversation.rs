use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::conversation::errors::ConversationError;
use crate::domain::conversation::models::Conversation;
use crate::domain::conversation::models::ConversationId;
use crate::domain::conversation::models::Exchange;
use crate::domain::conversation::models::NewExchange;
use crate::domain::conversation::ports::ConversationRepository;
use crate::domain::user::models::UserId;

pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_conversation(row: &PgRow) -> Result<Conversation, ConversationError> {
        Ok(Conversation {
            id: ConversationId(row.try_get("id").map_err(db_error)?),
            user_id: UserId(row.try_get("user_id").map_err(db_error)?),
            title: row.try_get("title").map_err(db_error)?,
            created_at: row.try_get("created_at").map_err(db_error)?,
            updated_at: row.try_get("updated_at").map_err(db_error)?,
        })
    }

    fn row_to_exchange(row: &PgRow) -> Result<Exchange, ConversationError> {
        Ok(Exchange {
            id: row.try_get("id").map_err(db_error)?,
            user_id: UserId(row.try_get("user_id").map_err(db_error)?),
            conversation_id: ConversationId(row.try_get("conversation_id").map_err(db_error)?),
            query_text: row.try_get("query_text").map_err(db_error)?,
            response_text: row.try_get("response_text").map_err(db_error)?,
            created_at: row.try_get("created_at").map_err(db_error)?,
            updated_at: row.try_get("updated_at").map_err(db_error)?,
        })
    }
}

fn db_error(e: sqlx::Error) -> ConversationError {
    ConversationError::DatabaseError(e.to_string())
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn create(
        &self,
        user_id: UserId,
        title: &str,
    ) -> Result<Conversation, ConversationError> {
        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO conversations (user_id, title, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, user_id, title, created_at, updated_at
            "#,
        )
        .bind(user_id.as_i64())
        .bind(title)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Self::row_to_conversation(&row)
    }

    async fn find_for_user(
        &self,
        id: ConversationId,
        user_id: UserId,
    ) -> Result<Option<Conversation>, ConversationError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM conversations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_i64())
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_conversation).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Conversation>, ConversationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM conversations
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(Self::row_to_conversation).collect()
    }

    async fn set_active(
        &self,
        user_id: UserId,
        id: Option<ConversationId>,
    ) -> Result<(), ConversationError> {
        sqlx::query(
            r#"
            UPDATE users
            SET active_conversation_id = $2
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .bind(id.map(|id| id.as_i64()))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn touch(&self, id: ConversationId) -> Result<(), ConversationError> {
        sqlx::query("UPDATE conversations SET updated_at = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn delete(&self, id: ConversationId, user_id: UserId) -> Result<bool, ConversationError> {
        // Exchanges go with the conversation (ON DELETE CASCADE); an active
        // pointer to it is cleared by ON DELETE SET NULL.
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1 AND user_id = $2")
            .bind(id.as_i64())
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exchanges(&self, id: ConversationId) -> Result<Vec<Exchange>, ConversationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, conversation_id, query_text, response_text, created_at, updated_at
            FROM queries
            WHERE conversation_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(Self::row_to_exchange).collect()
    }

    async fn save_exchange(&self, exchange: NewExchange) -> Result<Exchange, ConversationError> {
        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO queries (user_id, conversation_id, query_text, response_text, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, user_id, conversation_id, query_text, response_text, created_at, updated_at
            "#,
        )
        .bind(exchange.user_id.as_i64())
        .bind(exchange.conversation_id.as_i64())
        .bind(exchange.query_text.as_str())
        .bind(&exchange.response_text)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Self::row_to_exchange(&row)
    }
}
