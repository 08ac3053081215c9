use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;

/// Only scheme accepted in the `Authorization` header (matched literally).
pub const BEARER_SCHEME: &str = "Bearer";

/// Raw bearer token taken from an `Authorization: Bearer <token>` header.
///
/// Nothing about the token is verified at this stage.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredential(String);

impl BearerCredential {
    /// Extract the credential from an `Authorization` header value.
    ///
    /// # Errors
    /// * `NoCredential` - Header missing, or scheme without a credential
    /// * `SchemeInvalid` - Credential present under any scheme but `Bearer`
    pub fn from_authorization_header(header: Option<&str>) -> Result<Self, SessionError> {
        let header = header.map(str::trim).unwrap_or_default();

        let (scheme, credential) = match header.split_once(' ') {
            Some((scheme, credential)) => (scheme, credential.trim()),
            None => (header, ""),
        };

        if scheme.is_empty() || credential.is_empty() {
            return Err(SessionError::NoCredential);
        }

        if scheme != BEARER_SCHEME {
            return Err(SessionError::SchemeInvalid);
        }

        Ok(Self(credential.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens never end up in logs.
impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerCredential(..)")
    }
}

/// Revocation record: the exact token string that must be rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RevokedToken {
    pub token: String,
    pub revoked_at: DateTime<Utc>,
    /// Instant after which the token is rejected by expiry anyway; the
    /// record may be pruned from then on.
    pub expires_at: DateTime<Utc>,
}
