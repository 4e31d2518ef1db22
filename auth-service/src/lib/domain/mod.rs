pub mod auth;
pub mod errors;
pub mod password_reset;
pub mod session;
pub mod user;
