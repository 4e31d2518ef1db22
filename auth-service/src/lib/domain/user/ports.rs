use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `Duplicate` - Email is already registered (unique constraint)
    /// * `Database` - Database operation failed
    async fn create(&self, user: User) -> Result<User, RepositoryError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError>;

    /// Update email, name and active flag of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Duplicate` - New email is already registered
    /// * `Database` - Database operation failed
    async fn update(&self, user: User) -> Result<User, RepositoryError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Database` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;

    /// Replace the stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Database` - Database operation failed
    async fn update_password(&self, id: &UserId, password_hash: &str)
        -> Result<(), RepositoryError>;
}
