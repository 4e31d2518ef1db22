use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::UserId;

/// Durable receipt that a refresh token was issued.
///
/// Holds only the digest of the token. The raw token lives in the refresh
/// cache and in the client's hands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Record the issuance of `refresh_token` for a user.
    ///
    /// # Arguments
    /// * `user_id` - Owner of the token
    /// * `refresh_token` - Raw refresh token (only its digest is kept)
    /// * `expires_at` - Expiry of the refresh token
    pub fn issue(user_id: UserId, refresh_token: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            token_hash: auth::digest_token(refresh_token),
            expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Session unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
