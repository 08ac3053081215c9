use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::BearerCredential;
use crate::domain::session::models::RevokedToken;
use crate::domain::session::ports::RevocationStore;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Authentication gate: revocation list in front of stateless token
/// verification, followed by user resolution.
pub struct SessionService<RS, UR>
where
    RS: RevocationStore,
    UR: UserRepository,
{
    revocation_store: Arc<RS>,
    user_repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<RS, UR> SessionService<RS, UR>
where
    RS: RevocationStore,
    UR: UserRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `revocation_store` - Durable revoked token set
    /// * `user_repository` - Identity resolution
    /// * `authenticator` - Token verification
    pub fn new(
        revocation_store: Arc<RS>,
        user_repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            revocation_store,
            user_repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<RS, UR> SessionServicePort for SessionService<RS, UR>
where
    RS: RevocationStore,
    UR: UserRepository,
{
    async fn authenticate(&self, authorization: Option<&str>) -> Result<User, SessionError> {
        let credential = BearerCredential::from_authorization_header(authorization)?;

        // Revocation comes first: it is the only way to kill a token that
        // still verifies.
        if self.revocation_store.is_revoked(credential.as_str()).await? {
            tracing::warn!("Rejected revoked token");
            return Err(SessionError::TokenRevoked);
        }

        let claims = self
            .authenticator
            .validate_token(credential.as_str())
            .map_err(|e| {
                tracing::warn!(error = %e, "Token validation failed");
                SessionError::TokenInvalidOrExpired
            })?;

        let user_id = UserId(claims.user_id);
        self.user_repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| SessionError::UserStore(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Token subject no longer exists");
                SessionError::UserNotFound(user_id)
            })
    }

    async fn logout(&self, authorization: Option<&str>) -> Result<(), SessionError> {
        let credential = BearerCredential::from_authorization_header(authorization)?;

        let revoked_at = Utc::now();
        // Unreadable tokens get a full lifetime from now.
        let expires_at = self
            .authenticator
            .unverified_expiry(credential.as_str())
            .unwrap_or(revoked_at + self.authenticator.token_lifetime());

        let newly_revoked = self
            .revocation_store
            .revoke(RevokedToken {
                token: credential.as_str().to_string(),
                revoked_at,
                expires_at,
            })
            .await?;

        if newly_revoked {
            tracing::info!(expires_at = %expires_at, "Token revoked");
        } else {
            tracing::debug!("Token was already revoked");
        }

        Ok(())
    }

    async fn prune_revoked(&self) -> Result<u64, SessionError> {
        let removed = self.revocation_store.prune_expired(Utc::now()).await?;
        if removed > 0 {
            tracing::info!(removed, "Pruned expired revocation records");
        }
        Ok(removed)
    }
}
