use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::middleware::authorization_header;
use crate::inbound::http::router::AppState;

/// Revoke the presented bearer token. The token itself is not verified.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let authorization = authorization_header(&headers);

    state
        .session_service
        .logout(authorization.as_deref())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Successfully logged out"),
    ))
}
