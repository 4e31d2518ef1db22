use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenIssuer;
use auth::TokenKind;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthSettings;
use crate::domain::auth::models::AuthTokens;
use crate::domain::auth::models::ConfirmPasswordResetInput;
use crate::domain::auth::models::LoginInput;
use crate::domain::auth::models::PasswordResetInput;
use crate::domain::auth::models::PurgeReport;
use crate::domain::auth::models::RefreshTokensInput;
use crate::domain::auth::models::RegisterInput;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::errors::RepositoryError;
use crate::domain::password_reset::models::IssuedPasswordReset;
use crate::domain::password_reset::models::PasswordReset;
use crate::domain::password_reset::models::PASSWORD_RESET_TOKEN_BYTES;
use crate::domain::password_reset::ports::PasswordResetRepository;
use crate::domain::session::models::Session;
use crate::domain::session::ports::RefreshTokenCache;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for authentication and session lifecycle.
///
/// Stateless: all state lives behind the four injected ports. Writes that span
/// the cache and the durable store are ordered cache-first, with the cache
/// entry deleted again if the durable write fails.
pub struct AuthService<UR, SR, PR, RC>
where
    UR: UserRepository,
    SR: SessionRepository,
    PR: PasswordResetRepository,
    RC: RefreshTokenCache,
{
    user_repository: Arc<UR>,
    session_repository: Arc<SR>,
    password_reset_repository: Arc<PR>,
    refresh_token_cache: Arc<RC>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: auth::PasswordHasher,
    settings: AuthSettings,
}

impl<UR, SR, PR, RC> AuthService<UR, SR, PR, RC>
where
    UR: UserRepository,
    SR: SessionRepository,
    PR: PasswordResetRepository,
    RC: RefreshTokenCache,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - User persistence implementation
    /// * `session_repository` - Durable session log
    /// * `password_reset_repository` - Durable reset token store
    /// * `refresh_token_cache` - Live refresh token lookup
    /// * `token_issuer` - Signs and verifies bearer tokens
    /// * `settings` - Store deadlines
    pub fn new(
        user_repository: Arc<UR>,
        session_repository: Arc<SR>,
        password_reset_repository: Arc<PR>,
        refresh_token_cache: Arc<RC>,
        token_issuer: Arc<TokenIssuer>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            password_reset_repository,
            refresh_token_cache,
            token_issuer,
            password_hasher: auth::PasswordHasher::new(),
            settings,
        }
    }

    async fn within_deadline<T>(
        &self,
        operation: impl Future<Output = Result<T, RepositoryError>>,
    ) -> Result<T, RepositoryError> {
        match tokio::time::timeout(self.settings.store_timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(RepositoryError::Timeout(self.settings.store_timeout)),
        }
    }

    /// Issue a pair, cache the refresh token, then record the durable session.
    async fn open_session(&self, user_id: UserId) -> Result<AuthTokens, AuthError> {
        let pair = self.token_issuer.issue_pair(user_id).map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to sign tokens");
            AuthError::InternalServer(format!("Token signing failed: {}", e))
        })?;

        self.within_deadline(self.refresh_token_cache.set_refresh_token(
            &user_id,
            &pair.refresh_token,
            self.token_issuer.refresh_lifetime(),
        ))
        .await
        .map_err(|e| storage_failure("cache refresh token", e))?;

        let session = Session::issue(user_id, &pair.refresh_token, pair.refresh_expires_at);
        let session_id = session.id;

        if let Err(e) = self
            .within_deadline(self.session_repository.create(session))
            .await
        {
            tracing::error!(
                user_id = %user_id,
                error = %e,
                "Failed to create session, revoking cached refresh token"
            );

            if let Err(compensation) = self
                .within_deadline(self.refresh_token_cache.delete_refresh_token(&user_id))
                .await
            {
                tracing::error!(
                    user_id = %user_id,
                    error = %compensation,
                    "Failed to revoke cached refresh token after session failure"
                );
            }

            return Err(AuthError::InternalServer(format!(
                "Session creation failed: {}",
                e
            )));
        }

        tracing::debug!(user_id = %user_id, session_id = %session_id, "Session opened");
        Ok(pair.into())
    }

    async fn find_user_by_id(&self, user_id: &UserId) -> Result<Option<User>, AuthError> {
        self.within_deadline(self.user_repository.find_by_id(user_id))
            .await
            .map_err(|e| storage_failure("find user by id", e))
    }

    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        self.within_deadline(self.user_repository.find_by_email(email))
            .await
            .map_err(|e| storage_failure("find user by email", e))
    }
}

fn storage_failure(operation: &'static str, err: RepositoryError) -> AuthError {
    tracing::error!(operation, error = %err, "Storage operation failed");
    AuthError::InternalServer(format!("{} failed: {}", operation, err))
}

#[async_trait]
impl<UR, SR, PR, RC> AuthServicePort for AuthService<UR, SR, PR, RC>
where
    UR: UserRepository,
    SR: SessionRepository,
    PR: PasswordResetRepository,
    RC: RefreshTokenCache,
{
    async fn login(&self, input: LoginInput) -> Result<AuthTokens, AuthError> {
        let email = EmailAddress::new(input.email).map_err(|e| {
            tracing::warn!(error = %e, "Invalid email format");
            AuthError::from(e)
        })?;
        let password = Password::new(input.password).map_err(|e| {
            tracing::warn!("Invalid password format");
            AuthError::from(e)
        })?;

        let Some(user) = self.find_user_by_email(&email).await? else {
            tracing::warn!(email = %email, "Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Inactive user attempted login");
            return Err(AuthError::InvalidCredentials);
        }

        if !self
            .password_hasher
            .verify(password.expose(), &user.password_hash)
        {
            tracing::warn!(user_id = %user.id, "Invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.open_session(user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(tokens)
    }

    async fn register(&self, input: RegisterInput) -> Result<User, AuthError> {
        let name = DisplayName::new(input.name).map_err(|e| {
            tracing::warn!(error = %e, "Invalid name format");
            AuthError::from(e)
        })?;
        let email = EmailAddress::new(input.email).map_err(|e| {
            tracing::warn!(error = %e, "Invalid email format");
            AuthError::from(e)
        })?;
        let password = Password::new(input.password).map_err(|e| {
            tracing::warn!("Invalid password format");
            AuthError::from(e)
        })?;

        if self.find_user_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "User already exists");
            return Err(AuthError::UserExists);
        }

        let password_hash = self.password_hasher.hash(password.expose()).map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            AuthError::InternalServer(format!("Password hashing failed: {}", e))
        })?;

        let user = User::register(name, email, password_hash);

        let created = match self
            .within_deadline(self.user_repository.create(user))
            .await
        {
            Ok(user) => user,
            // Two concurrent registrations can both pass the probe above;
            // the unique constraint decides the loser.
            Err(RepositoryError::Duplicate(detail)) => {
                tracing::warn!(detail = %detail, "User already exists (unique constraint)");
                return Err(AuthError::UserExists);
            }
            Err(e) => return Err(storage_failure("create user", e)),
        };

        tracing::info!(user_id = %created.id, email = %created.email, "User registered");
        Ok(created)
    }

    async fn refresh_tokens(&self, input: RefreshTokensInput) -> Result<AuthTokens, AuthError> {
        if input.refresh_token.is_empty() {
            return Err(AuthError::InvalidInput(
                "Refresh token is required".to_string(),
            ));
        }

        let claims = self
            .token_issuer
            .verify(&input.refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::warn!(error = %e, "Refresh token rejected");
                AuthError::InvalidToken
            })?;

        let user_id = UserId::from_string(&claims.user_id).map_err(|e| {
            tracing::warn!(error = %e, "Malformed subject in refresh token");
            AuthError::InvalidToken
        })?;

        let cached = match self
            .within_deadline(self.refresh_token_cache.get_refresh_token(&user_id))
            .await
        {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "No live refresh token for user");
                return Err(AuthError::InvalidToken);
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to read cached refresh token");
                return Err(AuthError::InvalidToken);
            }
        };

        // Only the most recently issued token matches; superseded ones still
        // carry a valid signature and are stopped here.
        if cached != input.refresh_token {
            tracing::warn!(user_id = %user_id, "Refresh token mismatch");
            return Err(AuthError::InvalidToken);
        }

        let Some(user) = self.find_user_by_id(&user_id).await? else {
            tracing::warn!(user_id = %user_id, "Refresh for missing user");
            return Err(AuthError::UserNotFound);
        };

        if !user.is_active {
            tracing::warn!(user_id = %user_id, "Inactive user tried to refresh tokens");
            return Err(AuthError::Forbidden);
        }

        let tokens = self.open_session(user.id).await?;

        tracing::info!(user_id = %user_id, "Tokens refreshed");
        Ok(tokens)
    }

    async fn request_password_reset(
        &self,
        input: PasswordResetInput,
    ) -> Result<Option<IssuedPasswordReset>, AuthError> {
        let email = EmailAddress::new(input.email).map_err(|e| {
            tracing::warn!(error = %e, "Invalid email format");
            AuthError::from(e)
        })?;

        let Some(user) = self.find_user_by_email(&email).await? else {
            tracing::debug!(email = %email, "Password reset for unknown email");
            return Ok(None);
        };

        if !user.is_active {
            tracing::debug!(user_id = %user.id, "Password reset for inactive user");
            return Ok(None);
        }

        let token = auth::random_token(PASSWORD_RESET_TOKEN_BYTES).map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Failed to generate reset token");
            AuthError::InternalServer(format!("Reset token generation failed: {}", e))
        })?;

        let reset = self
            .within_deadline(
                self.password_reset_repository
                    .create(PasswordReset::issue(user.id, &token)),
            )
            .await
            .map_err(|e| storage_failure("create password reset", e))?;

        tracing::info!(user_id = %user.id, reset_id = %reset.id, "Password reset requested");
        Ok(Some(IssuedPasswordReset {
            user_id: user.id,
            token,
            expires_at: reset.expires_at,
        }))
    }

    async fn confirm_password_reset(
        &self,
        input: ConfirmPasswordResetInput,
    ) -> Result<(), AuthError> {
        if input.token.is_empty() {
            return Err(AuthError::InvalidInput("Reset token is required".to_string()));
        }
        let password = Password::new(input.new_password).map_err(|e| {
            tracing::warn!("Invalid password format");
            AuthError::from(e)
        })?;

        let token_hash = auth::digest_token(&input.token);
        let Some(reset) = self
            .within_deadline(self.password_reset_repository.find_by_token_hash(&token_hash))
            .await
            .map_err(|e| storage_failure("find password reset", e))?
        else {
            tracing::warn!("Unknown password reset token");
            return Err(AuthError::InvalidToken);
        };

        if !reset.is_redeemable(Utc::now()) {
            tracing::warn!(
                reset_id = %reset.id,
                used = reset.used,
                "Password reset token no longer redeemable"
            );
            return Err(AuthError::InvalidToken);
        }

        let Some(user) = self.find_user_by_id(&reset.user_id).await? else {
            tracing::warn!(user_id = %reset.user_id, "Password reset for missing user");
            return Err(AuthError::UserNotFound);
        };

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Inactive user tried to reset password");
            return Err(AuthError::Forbidden);
        }

        let password_hash = self.password_hasher.hash(password.expose()).map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            AuthError::InternalServer(format!("Password hashing failed: {}", e))
        })?;

        // The token is spent before the password changes: a failed update
        // afterwards leaves it used and the user must request a new one.
        match self
            .within_deadline(self.password_reset_repository.mark_as_used(&reset.id))
            .await
        {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => {
                tracing::warn!(reset_id = %reset.id, "Password reset already redeemed");
                return Err(AuthError::InvalidToken);
            }
            Err(e) => return Err(storage_failure("mark password reset used", e)),
        }

        match self
            .within_deadline(
                self.user_repository
                    .update_password(&user.id, &password_hash),
            )
            .await
        {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(AuthError::UserNotFound),
            Err(e) => return Err(storage_failure("update password", e)),
        }

        match self
            .within_deadline(
                self.refresh_token_cache
                    .delete_all_user_refresh_tokens(&user.id),
            )
            .await
        {
            Ok(revoked) => {
                tracing::debug!(user_id = %user.id, revoked, "Revoked cached refresh tokens");
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    "Failed to revoke refresh tokens after password reset"
                );
            }
        }

        tracing::info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }

    async fn logout(&self, user_id: &UserId) -> Result<(), AuthError> {
        self.within_deadline(self.refresh_token_cache.delete_refresh_token(user_id))
            .await
            .map_err(|e| storage_failure("delete refresh token", e))?;

        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    async fn authenticate(&self, access_token: &str) -> Result<UserId, AuthError> {
        if access_token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let claims = self
            .token_issuer
            .verify(access_token, TokenKind::Access)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::InvalidToken
            })?;

        UserId::from_string(&claims.user_id).map_err(|e| {
            tracing::warn!(error = %e, "Malformed subject in access token");
            AuthError::InvalidToken
        })
    }

    async fn current_user(&self, user_id: &UserId) -> Result<User, AuthError> {
        let user = self
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::Forbidden);
        }

        Ok(user)
    }

    async fn purge_expired(&self) -> Result<PurgeReport, AuthError> {
        let sessions = self
            .within_deadline(self.session_repository.delete_expired())
            .await
            .map_err(|e| storage_failure("delete expired sessions", e))?;
        let password_resets = self
            .within_deadline(self.password_reset_repository.delete_expired())
            .await
            .map_err(|e| storage_failure("delete expired password resets", e))?;

        if sessions > 0 || password_resets > 0 {
            tracing::info!(sessions, password_resets, "Expired records purged");
        }

        Ok(PurgeReport {
            sessions,
            password_resets,
        })
    }
}
