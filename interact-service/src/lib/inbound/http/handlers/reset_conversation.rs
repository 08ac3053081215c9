use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn reset_conversation(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ResetConversationResponseData>, ApiError> {
    let conversation = state.conversation_service.reset(&user).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetConversationResponseData {
            message: "Started a new conversation.".to_string(),
            conversation_id: conversation.id.as_i64(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetConversationResponseData {
    pub message: String,
    pub conversation_id: i64,
}
