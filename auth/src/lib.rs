//! Authentication utilities library
//!
//! Provides the credential primitives used by the auth service:
//! - Password hashing (Argon2id)
//! - Token digests and random tokens (SHA-256, OS CSPRNG)
//! - Signed access/refresh tokens (HS256 JWT)
//!
//! Nothing here performs I/O. Storage of hashes, sessions and cached tokens
//! belongs to the service that uses this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{TokenIssuer, TokenKind};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! );
//! let pair = issuer.issue_pair("user123").unwrap();
//! let claims = issuer.verify(&pair.refresh_token, TokenKind::Refresh).unwrap();
//! assert_eq!(claims.user_id, "user123");
//! ```
//!
//! ## Token Digests
//! ```
//! use auth::{digest_token, random_token};
//!
//! let token = random_token(16).unwrap();
//! assert_eq!(digest_token(&token).len(), 64);
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::digest_token;
pub use secret::random_token;
pub use secret::SecretError;
