pub mod cookies;
pub mod handlers;
pub mod middleware;
pub mod router;
