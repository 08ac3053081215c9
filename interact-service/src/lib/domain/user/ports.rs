use async_trait::async_trait;
use auth::AuthenticationResult;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// The password is hashed before anything touches the store.
    ///
    /// # Returns
    /// Created user together with its first access token
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Name is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn signup(
        &self,
        command: CreateUserCommand,
    ) -> Result<(User, AuthenticationResult), UserError>;

    /// Check email and password and issue an access token.
    ///
    /// # Errors
    /// * `EmailNotFound` - No user with that email
    /// * `IncorrectPassword` - Password mismatch or unreadable stored hash
    async fn login(&self, email: &str, password: &str)
        -> Result<AuthenticationResult, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Update email and/or password of an existing user.
    ///
    /// # Errors
    /// * `NothingToUpdate` - Command carries no field
    /// * `EmailAlreadyExists` - Email belongs to another user
    /// * `NotFound` - User does not exist
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Name is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Update email and password hash of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    async fn update(&self, user: User) -> Result<User, UserError>;
}
