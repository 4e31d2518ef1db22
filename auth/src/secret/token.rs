use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use sha2::Digest;
use sha2::Sha256;

use super::errors::SecretError;

/// Compute the durable footprint of a bearer secret.
///
/// SHA-256, lowercase hex. This is a fast digest, not a KDF: the inputs are
/// high-entropy tokens, so only collision resistance matters.
///
/// # Arguments
/// * `raw` - Raw token string
///
/// # Returns
/// 64 character hex digest
pub fn digest_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a random token from the operating system CSPRNG.
///
/// # Arguments
/// * `byte_length` - Number of random bytes (the hex output is twice as long)
///
/// # Returns
/// Hex-encoded random token
///
/// # Errors
/// * `EntropyUnavailable` - The OS random source could not be read
pub fn random_token(byte_length: usize) -> Result<String, SecretError> {
    let mut bytes = vec![0u8; byte_length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SecretError::EntropyUnavailable(e.to_string()))?;

    Ok(hex::encode(bytes))
}
