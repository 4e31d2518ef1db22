use thiserror::Error;

use crate::domain::user::errors::DisplayNameError;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;

/// Outcome classification of every authentication operation.
///
/// Adapter failures never leave the orchestrator as-is; they are folded into
/// one of these kinds. `InternalServer` keeps a detail string for server-side
/// logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error: {0}")]
    InternalServer(String),
}

impl From<EmailError> for AuthError {
    fn from(err: EmailError) -> Self {
        AuthError::InvalidInput(err.to_string())
    }
}

impl From<DisplayNameError> for AuthError {
    fn from(err: DisplayNameError) -> Self {
        AuthError::InvalidInput(err.to_string())
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::InvalidInput(err.to_string())
    }
}
