use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::AuthTokens;
use crate::domain::auth::models::LoginInput;
use crate::inbound::http::cookies::access_token_cookie;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state
        .auth_service
        .login(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let cookie = access_token_cookie(&tokens.access_token, tokens.access_expires_at, state.cookies);

    Ok((
        jar.add(cookie),
        ApiSuccess::new(StatusCode::OK, TokensData::from(tokens)),
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

/// Token pair as returned to clients by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokensData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<AuthTokens> for TokensData {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "Bearer".to_string(),
            expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
        }
    }
}
