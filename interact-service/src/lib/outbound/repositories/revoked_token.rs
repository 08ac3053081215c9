use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sha2::Digest;
use sha2::Sha256;
use sqlx::PgPool;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RevokedToken;
use crate::domain::session::ports::RevocationStore;

/// PostgreSQL revocation list.
///
/// Rows are keyed by the SHA-256 digest of the token, so bearer strings of
/// any length fit the unique index. The constraint serializes concurrent
/// revokes of the same token; every statement autocommits, so a returned
/// `revoke` is visible to all later lookups.
pub struct PostgresRevocationStore {
    pool: PgPool,
}

impl PostgresRevocationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Fixed-width lookup key for a bearer token.
pub fn token_digest(token: &str) -> Vec<u8> {
    Sha256::digest(token.as_bytes()).to_vec()
}

#[async_trait]
impl RevocationStore for PostgresRevocationStore {
    async fn revoke(&self, record: RevokedToken) -> Result<bool, SessionError> {
        let result = sqlx::query(
            r#"
            INSERT INTO revoked_tokens (token_sha256, token, revoked_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (token_sha256) DO NOTHING
            "#,
        )
        .bind(token_digest(&record.token))
        .bind(&record.token)
        .bind(record.revoked_at)
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::RevocationStore(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, SessionError> {
        let found = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT 1
            FROM revoked_tokens
            WHERE token_sha256 = $1
            "#,
        )
        .bind(token_digest(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::RevocationStore(e.to_string()))?;

        Ok(found.is_some())
    }

    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM revoked_tokens
            WHERE expires_at < $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::RevocationStore(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
