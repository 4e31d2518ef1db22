use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Discriminant carried by every token so one kind can never stand in for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Bearer token payload.
///
/// Flat claim set `{user_id, type, iat, exp, jti}`. `jti` makes every issued
/// token unique even when two pairs are minted within the same second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user identifier)
    pub user_id: String,

    /// Token kind ("access" or "refresh")
    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl TokenClaims {
    /// Create claims for a user that expire `lifetime` after now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `kind` - Access or refresh
    /// * `lifetime` - Time until the token expires
    pub fn for_user(user_id: impl ToString, kind: TokenKind, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id: user_id.to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}
