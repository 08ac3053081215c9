use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RevokedToken;
use crate::domain::user::models::User;

/// Port for the request-time authentication gate and logout.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Authenticate a request from its `Authorization` header value.
    ///
    /// Checks run in order: scheme, revocation, signature and expiry, user
    /// resolution. The first failure is returned.
    ///
    /// # Errors
    /// * `NoCredential` / `SchemeInvalid` - Header missing or not bearer
    /// * `TokenRevoked` - Token was logged out
    /// * `TokenInvalidOrExpired` - Bad signature, malformed or expired
    /// * `UserNotFound` - Token is valid but its user no longer exists
    async fn authenticate(&self, authorization: Option<&str>) -> Result<User, SessionError>;

    /// Revoke the presented bearer token.
    ///
    /// Any bearer-shaped string is accepted, verified or not. Revoking an
    /// already revoked token succeeds.
    ///
    /// # Errors
    /// * `NoCredential` / `SchemeInvalid` - Header missing or not bearer
    async fn logout(&self, authorization: Option<&str>) -> Result<(), SessionError>;

    /// Drop revocation records whose token has expired anyway.
    ///
    /// # Returns
    /// Number of records removed
    async fn prune_revoked(&self) -> Result<u64, SessionError>;
}

/// Durable set of revoked tokens.
///
/// A successful `revoke` must be visible to every subsequent `is_revoked`.
#[async_trait]
pub trait RevocationStore: Send + Sync + 'static {
    /// Record a token as revoked. Idempotent on the token string.
    ///
    /// # Returns
    /// True if the token was newly recorded, false if it already was
    async fn revoke(&self, record: RevokedToken) -> Result<bool, SessionError>;

    /// Exact-match lookup of a token string.
    async fn is_revoked(&self, token: &str) -> Result<bool, SessionError>;

    /// Delete records with `expires_at` before `now`.
    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError>;
}
