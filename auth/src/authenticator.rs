use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance/verification.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Shared signing secret
    /// * `algorithm` - HMAC algorithm identifier
    /// * `token_lifetime` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `JwtError` - Secret is empty or algorithm is not supported
    pub fn new(
        jwt_secret: &[u8],
        algorithm: &str,
        token_lifetime: Duration,
    ) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, algorithm)?,
            token_lifetime,
        })
    }

    /// Lifetime of issued tokens.
    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// Mismatch and malformed stored hash both yield `InvalidCredentials`.
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.matches(password, stored_hash) {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Verify credentials and issue a token for `user_id`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.verify_password(password, stored_hash)?;

        Ok(self.issue_token(user_id)?)
    }

    /// Issue a token for `user_id` expiring one lifetime from now.
    pub fn issue_token(&self, user_id: i64) -> Result<AuthenticationResult, JwtError> {
        self.issue_token_at(user_id, Utc::now())
    }

    /// Issue a token as if the current instant were `now`.
    pub fn issue_token_at(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_user(user_id, now, self.token_lifetime);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch or malformed token
    /// * `TokenExpired` - Library-level or logical expiry has passed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate a token, checking the logical expiry against `now`.
    ///
    /// The library-level `exp` check always runs against the system clock.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }

    /// Read the logical expiry of a token without checking its signature.
    ///
    /// Used for revocation bookkeeping only.
    pub fn unverified_expiry(&self, token: &str) -> Option<DateTime<Utc>> {
        self.jwt_handler
            .decode_unverified::<Claims>(token)
            .ok()
            .and_then(|claims| claims.expires_at())
    }
}
