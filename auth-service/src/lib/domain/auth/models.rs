use std::fmt;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;

/// Login request as received from the transport (not yet validated).
#[derive(Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Registration request as received from the transport (not yet validated).
#[derive(Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Token rotation request.
#[derive(Clone)]
pub struct RefreshTokensInput {
    pub refresh_token: String,
}

/// Password reset request.
#[derive(Debug, Clone)]
pub struct PasswordResetInput {
    pub email: String,
}

/// Redemption of a password reset token.
#[derive(Clone)]
pub struct ConfirmPasswordResetInput {
    pub token: String,
    pub new_password: String,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Debug for RefreshTokensInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTokensInput")
            .field("refresh_token", &"***")
            .finish()
    }
}

impl fmt::Debug for ConfirmPasswordResetInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmPasswordResetInput")
            .field("token", &"***")
            .field("new_password", &"***")
            .finish()
    }
}

/// Raw access/refresh pair returned to the caller. Never persisted as such.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<auth::TokenPair> for AuthTokens {
    fn from(pair: auth::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        }
    }
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_expires_at", &self.access_expires_at)
            .field("refresh_expires_at", &self.refresh_expires_at)
            .finish_non_exhaustive()
    }
}

/// Rows reclaimed by one expiry sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub sessions: u64,
    pub password_resets: u64,
}

/// Read-only runtime settings of the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct AuthSettings {
    /// Deadline applied to every individual store call.
    pub store_timeout: Duration,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
        }
    }
}
