use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::access_token_from_cookies;
use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the access token and adds the user to request extensions
///
/// The token is taken from `Authorization: Bearer` first, then from the
/// `access_token` cookie.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_access_token(req.headers()).ok_or_else(|| {
        tracing::debug!("Request without access token");
        ApiError::Unauthorized("Missing access token".to_string())
    })?;

    let user_id = state
        .auth_service
        .authenticate(&token)
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned);

    bearer.or_else(|| access_token_from_cookies(headers))
}
