use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::jwt::TokenKind;

/// Issues and verifies access/refresh token pairs.
///
/// Holds the signing secret and both lifetimes. Built once at startup and
/// shared read-only by every request.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

/// Freshly signed token pair with the expiry of each token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret
    /// * `access_lifetime` - Lifetime of access tokens
    /// * `refresh_lifetime` - Lifetime of refresh tokens
    pub fn new(secret: &[u8], access_lifetime: Duration, refresh_lifetime: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            access_lifetime,
            refresh_lifetime,
        }
    }

    pub fn refresh_lifetime(&self) -> Duration {
        self.refresh_lifetime
    }

    /// Sign a new access and refresh token for a user.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue_pair(&self, user_id: impl ToString) -> Result<TokenPair, JwtError> {
        let user_id = user_id.to_string();
        let access = TokenClaims::for_user(&user_id, TokenKind::Access, self.access_lifetime);
        let refresh = TokenClaims::for_user(&user_id, TokenKind::Refresh, self.refresh_lifetime);

        Ok(TokenPair {
            access_token: self.jwt_handler.encode(&access)?,
            refresh_token: self.jwt_handler.encode(&refresh)?,
            access_expires_at: timestamp_to_datetime(access.exp)?,
            refresh_expires_at: timestamp_to_datetime(refresh.exp)?,
        })
    }

    /// Verify a presented token and check its kind.
    ///
    /// # Arguments
    /// * `token` - Presented bearer token
    /// * `expected` - Kind required at the call site
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Signature, algorithm or format is wrong
    /// * `WrongKind` - The token is valid but of the other kind
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, JwtError> {
        let claims: TokenClaims = self.jwt_handler.decode(token)?;

        if claims.kind != expected {
            return Err(JwtError::WrongKind {
                expected,
                actual: claims.kind,
            });
        }

        Ok(claims)
    }
}

fn timestamp_to_datetime(timestamp: i64) -> Result<DateTime<Utc>, JwtError> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| JwtError::EncodingFailed(format!("Timestamp out of range: {}", timestamp)))
}
