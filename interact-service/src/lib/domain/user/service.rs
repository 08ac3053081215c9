use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn signup(
        &self,
        command: CreateUserCommand,
    ) -> Result<(User, AuthenticationResult), UserError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let new_user = NewUser {
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let user = self.repository.create(new_user).await?;
        let token = self.authenticator.issue_token(user.id.as_i64())?;

        tracing::info!(user_id = %user.id, "User signed up");

        Ok((user, token))
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticationResult, UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::EmailNotFound(email.to_string()))?;

        self.authenticator
            .authenticate(password, &user.password_hash, user.id.as_i64())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login rejected: incorrect password");
                    UserError::IncorrectPassword
                }
                AuthenticationError::PasswordError(err) => UserError::Password(err),
                AuthenticationError::JwtError(err) => UserError::Token(err),
            })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        if command.is_empty() {
            return Err(UserError::NothingToUpdate);
        }

        // Hash outside of any store round trip.
        let password_hash = match command.password.as_deref() {
            Some(password) if !password.is_empty() => {
                Some(self.authenticator.hash_password(password)?)
            }
            _ => None,
        };

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if let Some(existing) = self.repository.find_by_email(new_email.as_str()).await? {
                if existing.id != user.id {
                    return Err(UserError::EmailAlreadyExists(new_email.to_string()));
                }
            }
            user.email = new_email;
        }

        if let Some(password_hash) = password_hash {
            user.password_hash = password_hash;
        }

        self.repository.update(user).await
    }
}
