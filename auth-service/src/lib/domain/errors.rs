use std::time::Duration;

use thiserror::Error;

/// Error for storage adapter operations.
///
/// Shared by every repository port so the orchestrator can classify
/// failures without knowing which backend produced them.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),
}
