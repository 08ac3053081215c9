use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Default access token lifetime (40 minutes).
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 2400;

/// Access token payload.
///
/// `expires` is the logical expiry checked by the verifier itself, `exp` is
/// the same instant expressed as the registered claim so the JWT library
/// rejects stale tokens on its own as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject user identifier
    pub user_id: i64,

    /// Logical expiry (Unix timestamp, fractional seconds)
    pub expires: f64,

    /// Registered expiry claim (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring `lifetime` after `now`.
    ///
    /// # Arguments
    /// * `user_id` - Subject user identifier
    /// * `now` - Issuance instant
    /// * `lifetime` - Time until the token expires
    pub fn for_user(user_id: i64, now: DateTime<Utc>, lifetime: Duration) -> Self {
        let expiration = now + lifetime;

        Self {
            user_id,
            expires: expiration.timestamp_millis() as f64 / 1000.0,
            exp: expiration.timestamp(),
        }
    }

    /// Logical expiry as a UTC instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis((self.expires * 1000.0) as i64)
    }

    /// Check if the token is logically expired at `now`.
    ///
    /// A token whose `expires` equals `now` is still valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let current = now.timestamp_millis() as f64 / 1000.0;
        self.expires < current
    }
}
