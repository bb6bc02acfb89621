/// Bearer token revocation list
///
/// Logout and refresh do not delete anything a client holds; they record
/// the token's `jti` here and the bearer middleware rejects any token
/// whose `jti` appears in this table. Rows are only useful until the
/// token would have expired on its own, so startup purges lapsed ones.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// A single revocation entry
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RevokedToken {
    /// The revoked token's ID
    pub jti: Uuid,

    /// When the revoked token itself expires
    pub expires_at: DateTime<Utc>,

    /// When the revocation was recorded
    pub revoked_at: DateTime<Utc>,
}

impl RevokedToken {
    /// Records a revocation for the given token ID
    ///
    /// Idempotent: revoking an already-revoked token is a no-op, which
    /// keeps logout safe to repeat from the caller's perspective.
    pub async fn revoke(
        pool: &PgPool,
        jti: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (jti, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Checks whether a token ID has been revoked
    pub async fn is_revoked(pool: &PgPool, jti: Uuid) -> Result<bool, sqlx::Error> {
        let revoked: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1)")
                .bind(jti)
                .fetch_one(pool)
                .await?;

        Ok(revoked)
    }

    /// Deletes revocations whose tokens have expired anyway
    ///
    /// Returns the number of rows removed.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(pool)
            .await?;

        let purged = result.rows_affected();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired token revocations");
        }

        Ok(purged)
    }
}
