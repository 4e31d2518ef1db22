mod refresh_tokens;

pub use refresh_tokens::RedisRefreshTokenCache;

use crate::domain::errors::RepositoryError;

impl From<redis::RedisError> for RepositoryError {
    fn from(err: redis::RedisError) -> Self {
        RepositoryError::Cache(err.to_string())
    }
}
