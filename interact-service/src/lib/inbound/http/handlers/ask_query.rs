use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::conversation::errors::ConversationError;
use crate::domain::conversation::models::AskQueryCommand;
use crate::domain::conversation::models::ConversationId;
use crate::domain::conversation::models::QueryAnswer;
use crate::domain::conversation::models::QueryText;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn ask_query(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Json(body): Json<AskQueryRequest>,
) -> Result<ApiSuccess<AskQueryResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .conversation_service
        .ask(&user, command)
        .await
        .map_err(ApiError::from)
        .map(|answer| ApiSuccess::new(StatusCode::OK, answer.into()))
}

/// HTTP request body for a query (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AskQueryRequest {
    query_text: String,
    #[serde(default)]
    conversation_id: Option<i64>,
}

impl AskQueryRequest {
    fn try_into_command(self) -> Result<AskQueryCommand, ConversationError> {
        Ok(AskQueryCommand {
            query_text: QueryText::new(self.query_text)?,
            conversation_id: self.conversation_id.map(ConversationId),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskQueryResponseData {
    pub query: String,
    pub response: String,
    pub conversation_id: i64,
}

impl From<QueryAnswer> for AskQueryResponseData {
    fn from(answer: QueryAnswer) -> Self {
        Self {
            query: answer.query,
            response: answer.response,
            conversation_id: answer.conversation_id.as_i64(),
        }
    }
}
