use thiserror::Error;

/// Error type for random secret generation.
#[derive(Debug, Clone, Error)]
pub enum SecretError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}
