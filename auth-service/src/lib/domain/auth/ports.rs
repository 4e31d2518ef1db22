use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthTokens;
use crate::domain::auth::models::ConfirmPasswordResetInput;
use crate::domain::auth::models::LoginInput;
use crate::domain::auth::models::PasswordResetInput;
use crate::domain::auth::models::PurgeReport;
use crate::domain::auth::models::RefreshTokensInput;
use crate::domain::auth::models::RegisterInput;
use crate::domain::password_reset::models::IssuedPasswordReset;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for authentication and session lifecycle operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and open a new session.
    ///
    /// # Returns
    /// Fresh access/refresh pair
    ///
    /// # Errors
    /// * `InvalidInput` - Email or password has the wrong shape
    /// * `InvalidCredentials` - Unknown email, inactive user or wrong password
    /// * `InternalServer` - Signing or a store call failed
    async fn login(&self, input: LoginInput) -> Result<AuthTokens, AuthError>;

    /// Create a new active user.
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `InvalidInput` - Name, email or password has the wrong shape
    /// * `UserExists` - Email is already registered
    /// * `InternalServer` - Hashing or persistence failed
    async fn register(&self, input: RegisterInput) -> Result<User, AuthError>;

    /// Exchange the live refresh token for a new pair.
    ///
    /// # Returns
    /// Fresh access/refresh pair; the presented token becomes unusable
    ///
    /// # Errors
    /// * `InvalidInput` - Empty token
    /// * `InvalidToken` - Bad signature, wrong type, expired, or superseded
    /// * `UserNotFound` - Account no longer exists
    /// * `Forbidden` - Account deactivated
    /// * `InternalServer` - Signing or a store call failed
    async fn refresh_tokens(&self, input: RefreshTokensInput) -> Result<AuthTokens, AuthError>;

    /// Issue a password reset token if the email belongs to an active user.
    ///
    /// Unknown and inactive accounts succeed without side effects.
    ///
    /// # Returns
    /// The issued token for delivery, or None when nothing was issued
    ///
    /// # Errors
    /// * `InvalidInput` - Email has the wrong shape
    /// * `InternalServer` - Token generation or persistence failed
    async fn request_password_reset(
        &self,
        input: PasswordResetInput,
    ) -> Result<Option<IssuedPasswordReset>, AuthError>;

    /// Redeem a reset token and set a new password.
    ///
    /// # Errors
    /// * `InvalidInput` - Empty token or new password has the wrong shape
    /// * `InvalidToken` - Unknown, expired or already used token
    /// * `UserNotFound` - Account no longer exists
    /// * `Forbidden` - Account deactivated
    /// * `InternalServer` - Hashing or a store call failed
    async fn confirm_password_reset(&self, input: ConfirmPasswordResetInput)
        -> Result<(), AuthError>;

    /// Revoke the live refresh token of a user.
    ///
    /// # Errors
    /// * `InternalServer` - Cache call failed
    async fn logout(&self, user_id: &UserId) -> Result<(), AuthError>;

    /// Verify an access token and return its subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, wrong type, expired, or malformed subject
    async fn authenticate(&self, access_token: &str) -> Result<UserId, AuthError>;

    /// Load the account behind an authenticated request.
    ///
    /// # Errors
    /// * `UserNotFound` - Account no longer exists
    /// * `Forbidden` - Account deactivated
    /// * `InternalServer` - Store call failed
    async fn current_user(&self, user_id: &UserId) -> Result<User, AuthError>;

    /// Delete expired sessions and password resets.
    ///
    /// # Errors
    /// * `InternalServer` - Store call failed
    async fn purge_expired(&self) -> Result<PurgeReport, AuthError>;
}
