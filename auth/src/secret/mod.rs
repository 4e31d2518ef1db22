pub mod errors;
pub mod token;

pub use errors::SecretError;
pub use token::digest_token;
pub use token::random_token;
