use async_trait::async_trait;
use chrono::Duration;

use crate::domain::errors::RepositoryError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;
use crate::domain::user::models::UserId;

/// Durable log of issued refresh-token sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Persist a new session row.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn create(&self, session: Session) -> Result<Session, RepositoryError>;

    /// Retrieve a session by identifier.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;

    /// Retrieve all sessions of a user, newest first.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Session>, RepositoryError>;

    /// Remove a single session.
    ///
    /// # Errors
    /// * `NotFound` - Session does not exist
    /// * `Database` - Database operation failed
    async fn delete(&self, id: &SessionId) -> Result<(), RepositoryError>;

    /// Remove every session whose expiry has passed.
    ///
    /// # Returns
    /// Number of deleted rows
    async fn delete_expired(&self) -> Result<u64, RepositoryError>;
}

/// Fast lookup of the single live refresh token per user.
///
/// This is the authority used to verify a presented refresh token.
#[async_trait]
pub trait RefreshTokenCache: Send + Sync + 'static {
    /// Store (or overwrite) the live refresh token of a user.
    ///
    /// # Arguments
    /// * `user_id` - Owner of the token
    /// * `token` - Raw refresh token
    /// * `ttl` - Time to live, equal to the refresh-token lifetime
    ///
    /// # Errors
    /// * `Cache` - Cache operation failed
    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
        ttl: Duration,
    ) -> Result<(), RepositoryError>;

    /// Fetch the live refresh token of a user, if any.
    async fn get_refresh_token(&self, user_id: &UserId) -> Result<Option<String>, RepositoryError>;

    /// Remove the live refresh token of a user. Missing entries are not an error.
    async fn delete_refresh_token(&self, user_id: &UserId) -> Result<(), RepositoryError>;

    /// Remove every cached refresh entry whose key starts with the user's prefix.
    ///
    /// # Returns
    /// Number of removed entries
    async fn delete_all_user_refresh_tokens(&self, user_id: &UserId)
        -> Result<u64, RepositoryError>;
}
