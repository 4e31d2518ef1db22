use async_trait::async_trait;
use chrono::Duration;
use redis::aio::ConnectionManager;

use crate::domain::errors::RepositoryError;
use crate::domain::session::ports::RefreshTokenCache;
use crate::domain::user::models::UserId;

/// Key prefix of every cached refresh token.
pub const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";

const SCAN_BATCH_SIZE: usize = 100;

/// Refresh token cache backed by Redis.
///
/// One key per user (`refresh_token:{user_id}`) holding the raw token, with
/// an expiry equal to the refresh token lifetime.
#[derive(Clone)]
pub struct RedisRefreshTokenCache {
    connection: ConnectionManager,
}

impl RedisRefreshTokenCache {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

fn refresh_token_key(user_id: &UserId) -> String {
    format!("{}{}", REFRESH_TOKEN_PREFIX, user_id)
}

#[async_trait]
impl RefreshTokenCache for RedisRefreshTokenCache {
    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
        ttl: Duration,
    ) -> Result<(), RepositoryError> {
        let mut connection = self.connection.clone();
        let seconds = ttl.num_seconds().max(1);

        let _: () = redis::cmd("SET")
            .arg(refresh_token_key(user_id))
            .arg(token)
            .arg("EX")
            .arg(seconds)
            .query_async(&mut connection)
            .await?;

        Ok(())
    }

    async fn get_refresh_token(&self, user_id: &UserId) -> Result<Option<String>, RepositoryError> {
        let mut connection = self.connection.clone();

        let token: Option<String> = redis::cmd("GET")
            .arg(refresh_token_key(user_id))
            .query_async(&mut connection)
            .await?;

        Ok(token)
    }

    async fn delete_refresh_token(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        let mut connection = self.connection.clone();

        let _: u64 = redis::cmd("DEL")
            .arg(refresh_token_key(user_id))
            .query_async(&mut connection)
            .await?;

        Ok(())
    }

    async fn delete_all_user_refresh_tokens(
        &self,
        user_id: &UserId,
    ) -> Result<u64, RepositoryError> {
        let mut connection = self.connection.clone();
        let pattern = format!("{}*", refresh_token_key(user_id));
        let mut cursor: u64 = 0;
        let mut deleted: u64 = 0;

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut connection)
                .await?;

            if !keys.is_empty() {
                let removed: u64 = redis::cmd("DEL")
                    .arg(&keys)
                    .query_async(&mut connection)
                    .await?;
                deleted += removed;
            }

            if next_cursor == 0 {
                break;
            }
            cursor = next_cursor;
        }

        Ok(deleted)
    }
}
