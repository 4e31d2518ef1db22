use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::password_reset::models::PasswordReset;
use crate::domain::password_reset::models::PasswordResetId;

/// Durable record of outstanding password reset tokens.
#[async_trait]
pub trait PasswordResetRepository: Send + Sync + 'static {
    /// Persist a new reset.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn create(&self, reset: PasswordReset) -> Result<PasswordReset, RepositoryError>;

    /// Retrieve a reset by the digest of its token.
    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<PasswordReset>, RepositoryError>;

    /// Flip `used` from false to true.
    ///
    /// The update only matches unused rows, so of two concurrent callers
    /// exactly one succeeds.
    ///
    /// # Errors
    /// * `NotFound` - No unused reset with this id
    /// * `Database` - Database operation failed
    async fn mark_as_used(&self, id: &PasswordResetId) -> Result<(), RepositoryError>;

    /// Remove every reset whose expiry has passed.
    ///
    /// # Returns
    /// Number of deleted rows
    async fn delete_expired(&self) -> Result<u64, RepositoryError>;
}
