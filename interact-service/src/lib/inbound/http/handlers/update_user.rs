use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating the current user (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateUserCommand {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct UpdateUserResponseData {
    pub message: String,
    pub user: UpdatedUserData,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct UpdatedUserData {
    pub id: i64,
    pub email: String,
}

impl From<User> for UpdatedUserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_i64(),
            email: user.email.as_str().to_string(),
        }
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UpdateUserResponseData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|user| {
            ApiSuccess::new(
                StatusCode::OK,
                UpdateUserResponseData {
                    message: "User updated successfully".to_string(),
                    user: user.into(),
                },
            )
        })
}
