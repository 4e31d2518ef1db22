use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::login::TokensData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::RefreshTokensInput;
use crate::inbound::http::cookies::access_token_cookie;
use crate::inbound::http::router::AppState;

pub async fn refresh_tokens(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RefreshTokensRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state
        .auth_service
        .refresh_tokens(RefreshTokensInput {
            refresh_token: body.refresh_token,
        })
        .await?;

    let cookie = access_token_cookie(&tokens.access_token, tokens.access_expires_at, state.cookies);

    Ok((
        jar.add(cookie),
        ApiSuccess::new(StatusCode::OK, TokensData::from(tokens)),
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokensRequestBody {
    refresh_token: String,
}
