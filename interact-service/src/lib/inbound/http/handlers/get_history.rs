use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::conversation::models::ConversationHistory;
use crate::domain::conversation::models::Exchange;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_history(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<ConversationData>>, ApiError> {
    state
        .conversation_service
        .history(&user)
        .await
        .map_err(ApiError::from)
        .map(|history| {
            ApiSuccess::new(
                StatusCode::OK,
                history.into_iter().map(ConversationData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationData {
    pub conversation_id: i64,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub queries: Vec<QueryData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryData {
    pub question: String,
    pub response: String,
    pub updated_at: DateTime<Utc>,
}

impl From<ConversationHistory> for ConversationData {
    fn from(history: ConversationHistory) -> Self {
        Self {
            conversation_id: history.conversation.id.as_i64(),
            title: history.conversation.title,
            created_at: history.conversation.created_at,
            updated_at: history.conversation.updated_at,
            queries: history.exchanges.into_iter().map(QueryData::from).collect(),
        }
    }
}

impl From<Exchange> for QueryData {
    fn from(exchange: Exchange) -> Self {
        Self {
            question: exchange.query_text,
            response: exchange.response_text,
            updated_at: exchange.updated_at,
        }
    }
}
