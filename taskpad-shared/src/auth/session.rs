/// Authenticated request session
///
/// The bearer middleware validates the presented token, checks the
/// revocation list, and inserts an `AuthSession` into the request
/// extensions. Handlers receive the session explicitly via Axum's
/// `Extension` extractor; there is no ambient "current user" lookup.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::jwt::Claims;

/// The principal and token identity for an authenticated request
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Authenticated user ID (the token's subject)
    pub user_id: Uuid,

    /// ID (`jti`) of the token presented on this request
    pub token_id: Uuid,

    /// When the presented token expires
    ///
    /// Carried along so logout can record a revocation that lapses
    /// together with the token itself.
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Builds a session from validated token claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            token_id: claims.jti,
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_from_claims() {
        let claims = Claims::new(Uuid::new_v4(), Duration::seconds(3600));
        let session = AuthSession::from_claims(&claims);

        assert_eq!(session.user_id, claims.sub);
        assert_eq!(session.token_id, claims.jti);
        assert_eq!(session.expires_at.timestamp(), claims.exp);
    }
}
