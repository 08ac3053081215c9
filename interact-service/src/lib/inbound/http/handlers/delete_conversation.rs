use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::conversation::models::ConversationId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_conversation(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(conversation_id): Path<i64>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .conversation_service
        .delete_conversation(&user, ConversationId(conversation_id))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Conversation and all related queries deleted successfully."),
    ))
}
