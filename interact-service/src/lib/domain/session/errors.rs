use thiserror::Error;

use crate::domain::user::models::UserId;

/// Outcome of a rejected authentication attempt or logout.
///
/// Every variant is terminal for the request; none is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid authorization code.")]
    NoCredential,

    #[error("Invalid authentication scheme.")]
    SchemeInvalid,

    #[error("Token has been revoked.")]
    TokenRevoked,

    #[error("Invalid or expired token.")]
    TokenInvalidOrExpired,

    #[error("User not found")]
    UserNotFound(UserId),

    // Infrastructure errors
    #[error("Revocation store error: {0}")]
    RevocationStore(String),

    #[error("User store error: {0}")]
    UserStore(String),
}
