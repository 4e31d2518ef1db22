mod password_reset;
mod session;
mod user;

pub use password_reset::PostgresPasswordResetRepository;
pub use session::PostgresSessionRepository;
pub use user::PostgresUserRepository;

use crate::domain::errors::RepositoryError;

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::Duplicate(db_err.constraint().unwrap_or("unique").to_string())
            }
            other => RepositoryError::Database(other.to_string()),
        }
    }
}
