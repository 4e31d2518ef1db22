use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::cookies::cleared_access_token_cookie;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    state.auth_service.logout(&authenticated.user_id).await?;

    Ok((
        jar.add(cleared_access_token_cookie(state.cookies)),
        ApiSuccess::new(StatusCode::OK, MessageData::new("Logged out")),
    ))
}
