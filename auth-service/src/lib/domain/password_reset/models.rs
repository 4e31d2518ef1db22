use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::UserId;

/// Random bytes in a reset token (hex-encoded to 32 characters).
pub const PASSWORD_RESET_TOKEN_BYTES: usize = 16;

/// Hours a reset token stays usable after issuance.
pub const PASSWORD_RESET_LIFETIME_HOURS: i64 = 24;

/// One-time capability to set a new password.
///
/// Only the digest of the token is stored, the same way sessions store
/// refresh tokens. Transitions Unused -> Used exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub id: PasswordResetId,
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl PasswordReset {
    /// Create an unused reset for `raw_token`, valid for 24 hours.
    pub fn issue(user_id: UserId, raw_token: &str) -> Self {
        let now = Utc::now();

        Self {
            id: PasswordResetId::new(),
            user_id,
            token_hash: auth::digest_token(raw_token),
            expires_at: now + Duration::hours(PASSWORD_RESET_LIFETIME_HOURS),
            used: false,
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Whether the reset can still be redeemed at `now`.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        !self.used && !self.is_expired(now)
    }
}

/// Password reset unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasswordResetId(pub Uuid);

impl PasswordResetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PasswordResetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PasswordResetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw reset token handed to the delivery collaborator.
#[derive(Clone)]
pub struct IssuedPasswordReset {
    pub user_id: UserId,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for IssuedPasswordReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedPasswordReset")
            .field("user_id", &self.user_id)
            .field("token", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
